//! Hour-of-day aggregation of bathroom events.
//!
//! Buckets event timestamps by wall-clock hour in a configured zone, picks the
//! most frequent hour and describes it for the dashboard's "Most Common Time"
//! card (`"8:05 AM"`, `"Morning walk"`).
//!
//! Everything here is a pure function of its input. The zone is an explicit
//! part of [`HourOfDayAggregator`] rather than whatever zone the process runs
//! in, so results are reproducible when the zone is `utc` or a fixed offset.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::time::{InvalidTimestamp, ZoneSetting};

/// `displayTime` reported when there is nothing to aggregate.
pub const NO_DATA_TIME: &str = "N/A";
/// `description` reported when there is nothing to aggregate.
pub const NO_DATA_DESCRIPTION: &str = "No data available";

/// Hour of the day, 0 through 23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HourOfDay(u8);

impl HourOfDay {
    pub fn new(hour: u8) -> Option<Self> {
        (hour < 24).then_some(Self(hour))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    fn of(wall_clock: &NaiveDateTime) -> Self {
        // chrono guarantees hour() < 24
        Self(wall_clock.hour() as u8)
    }
}

impl TryFrom<u8> for HourOfDay {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("hour must be in 0..=23, got {}", value))
    }
}

impl From<HourOfDay> for u8 {
    fn from(hour: HourOfDay) -> Self {
        hour.0
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What to do with a timestamp that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidTimestampPolicy {
    /// Drop the entry and log a warning
    #[default]
    Skip,
    /// Fail the whole aggregation
    Reject,
}

impl FromStr for InvalidTimestampPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "reject" => Ok(Self::Reject),
            _ => Err(format!("Unknown invalid timestamp policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeOfDayError {
    #[error("timestamp #{index} rejected: {source}")]
    InvalidTimestamp {
        /// Position in the combined input sequence
        index: usize,
        #[source]
        source: InvalidTimestamp,
    },
}

/// Events that fell into one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourBucket {
    pub hour: HourOfDay,
    pub count: usize,
    /// Clock time of the first event seen in this hour, e.g. `"8:05 AM"`
    pub display_label: String,
}

/// Per-hour event counts, ordered by hour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HourHistogram {
    buckets: BTreeMap<HourOfDay, HourBucket>,
}

impl HourHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one event. The first event of an hour fixes its label.
    pub fn record(&mut self, wall_clock: &NaiveDateTime) {
        let hour = HourOfDay::of(wall_clock);
        self.buckets
            .entry(hour)
            .and_modify(|bucket| bucket.count += 1)
            .or_insert_with(|| HourBucket {
                hour,
                count: 1,
                display_label: format_clock_label(wall_clock),
            });
    }

    pub fn get(&self, hour: HourOfDay) -> Option<&HourBucket> {
        self.buckets.get(&hour)
    }

    /// Buckets in ascending hour order.
    pub fn iter(&self) -> impl Iterator<Item = &HourBucket> {
        self.buckets.values()
    }

    pub fn hours(&self) -> impl Iterator<Item = HourOfDay> + '_ {
        self.buckets.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of events recorded across all hours.
    pub fn total_count(&self) -> usize {
        self.buckets.values().map(|b| b.count).sum()
    }
}

/// Outcome of one aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub most_common_hour: Option<HourOfDay>,
    pub display_time: String,
    pub description: String,
}

impl AggregationResult {
    pub fn no_data() -> Self {
        Self {
            most_common_hour: None,
            display_time: NO_DATA_TIME.to_string(),
            description: NO_DATA_DESCRIPTION.to_string(),
        }
    }
}

/// Presentation shape of an [`AggregationResult`]: `{ time, description }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostCommonTime {
    pub time: String,
    pub description: String,
}

impl From<&AggregationResult> for MostCommonTime {
    fn from(result: &AggregationResult) -> Self {
        Self {
            time: result.display_time.clone(),
            description: result.description.clone(),
        }
    }
}

impl From<AggregationResult> for MostCommonTime {
    fn from(result: AggregationResult) -> Self {
        Self {
            time: result.display_time,
            description: result.description,
        }
    }
}

/// Hour-of-day aggregator bound to a zone and an invalid timestamp policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HourOfDayAggregator {
    zone: ZoneSetting,
    policy: InvalidTimestampPolicy,
}

impl HourOfDayAggregator {
    pub fn new(zone: ZoneSetting, policy: InvalidTimestampPolicy) -> Self {
        Self { zone, policy }
    }

    pub fn zone(&self) -> ZoneSetting {
        self.zone
    }

    pub fn policy(&self) -> InvalidTimestampPolicy {
        self.policy
    }

    /// Build the per-hour histogram of raw timestamp strings.
    ///
    /// Input order only matters for which timestamp labels an hour (the
    /// first one seen). Unparsable entries are skipped with a warning or
    /// fail the call, depending on the policy.
    pub fn build_histogram<I, S>(&self, timestamps: I) -> Result<HourHistogram, TimeOfDayError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut histogram = HourHistogram::new();
        let mut skipped = 0usize;

        for (index, raw) in timestamps.into_iter().enumerate() {
            match self.zone.wall_clock_of(raw.as_ref()) {
                Ok(wall_clock) => histogram.record(&wall_clock),
                Err(source) => match self.policy {
                    InvalidTimestampPolicy::Reject => {
                        return Err(TimeOfDayError::InvalidTimestamp { index, source });
                    }
                    InvalidTimestampPolicy::Skip => {
                        warn!("Skipping timestamp #{}: {}", index, source);
                        skipped += 1;
                    }
                },
            }
        }

        if skipped > 0 {
            warn!(
                "Hour-of-day histogram built from {} timestamps, {} skipped",
                histogram.total_count(),
                skipped
            );
        }

        Ok(histogram)
    }

    /// Build the per-hour histogram of already-resolved instants.
    pub fn build_histogram_from_instants<I>(&self, instants: I) -> HourHistogram
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        let mut histogram = HourHistogram::new();
        for instant in instants {
            histogram.record(&self.zone.wall_clock(&instant));
        }
        histogram
    }

    /// Most common time of day across pee and poop timestamps combined.
    pub fn summarize<P, Q, S>(&self, pee: P, poop: Q) -> Result<AggregationResult, TimeOfDayError>
    where
        P: IntoIterator<Item = S>,
        Q: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let histogram = self.build_histogram(pee.into_iter().chain(poop))?;
        Ok(summarize_histogram(&histogram))
    }

    /// [`summarize`](Self::summarize) for already-resolved instants.
    pub fn summarize_instants<P, Q>(&self, pee: P, poop: Q) -> AggregationResult
    where
        P: IntoIterator<Item = DateTime<Utc>>,
        Q: IntoIterator<Item = DateTime<Utc>>,
    {
        let histogram = self.build_histogram_from_instants(pee.into_iter().chain(poop));
        summarize_histogram(&histogram)
    }
}

/// Hour with the highest count. Ties go to the earliest hour of the day.
pub fn select_dominant_hour(histogram: &HourHistogram) -> Option<HourOfDay> {
    histogram
        .iter()
        .fold(None, |best: Option<&HourBucket>, bucket| match best {
            Some(current) if current.count >= bucket.count => Some(current),
            _ => Some(bucket),
        })
        .map(|bucket| bucket.hour)
}

/// Qualitative time-of-day label for an hour.
pub fn describe_hour(hour: HourOfDay) -> &'static str {
    match hour.value() {
        5..=9 => "Morning walk",
        10..=11 => "Late morning walk",
        12..=14 => "Afternoon walk",
        15..=17 => "Late afternoon walk",
        18..=21 => "Evening walk",
        _ => "Night walk",
    }
}

/// 12-hour clock label with minutes, e.g. `"8:05 AM"` or `"12:30 PM"`.
pub fn format_clock_label(wall_clock: &NaiveDateTime) -> String {
    wall_clock.format("%-I:%M %p").to_string()
}

/// Turn a histogram into the dashboard result.
pub fn summarize_histogram(histogram: &HourHistogram) -> AggregationResult {
    let Some(hour) = select_dominant_hour(histogram) else {
        return AggregationResult::no_data();
    };

    let display_time = histogram
        .get(hour)
        .map(|bucket| bucket.display_label.clone())
        .unwrap_or_else(|| NO_DATA_TIME.to_string());

    AggregationResult {
        most_common_hour: Some(hour),
        display_time,
        description: describe_hour(hour).to_string(),
    }
}

#[cfg(test)]
#[path = "time_of_day_tests.rs"]
mod time_of_day_tests;
