//! Dashboard statistics over stored bathroom events.
//!
//! Produces the payload behind `GET /api/bathroom-logs/stats`: raw event
//! times per kind, per-day counts for the line charts, the stool consistency
//! distribution and the "Most Common Time" card.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::time_of_day::{HourOfDayAggregator, MostCommonTime};
use crate::models::{BathroomLog, Consistency};

/// Days covered by the per-day series when nothing else is configured.
pub const DEFAULT_WINDOW_DAYS: usize = 7;

/// Longest per-day window: one leap year.
pub const MAX_WINDOW_DAYS: usize = 366;

/// Events of one kind: raw times plus a per-day series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSeries {
    /// RFC 3339 event times, oldest first
    pub times: Vec<String>,
    /// One label per day of the window, oldest first
    pub labels: Vec<String>,
    /// Event count per day, aligned with `labels`
    pub data: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyDistribution {
    pub labels: Vec<String>,
    pub data: Vec<usize>,
}

/// Average events per day over the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyAverages {
    pub pee: f64,
    pub poop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BathroomStats {
    pub pee: EventSeries,
    pub poop: EventSeries,
    pub consistency: ConsistencyDistribution,
    pub averages: DailyAverages,
    pub most_common_time: MostCommonTime,
}

/// Compute dashboard statistics.
///
/// `both` events count once as pee and once as poop. The per-day window ends
/// on `today` (a date in the aggregator's zone) and spans `window_days` days,
/// clamped to `1..=MAX_WINDOW_DAYS`. Days before the earliest representable
/// date are left out of the window.
pub fn compute_bathroom_stats(
    logs: &[BathroomLog],
    aggregator: &HourOfDayAggregator,
    today: NaiveDate,
    window_days: usize,
) -> BathroomStats {
    let window_days = window_days.clamp(1, MAX_WINDOW_DAYS);
    let zone = aggregator.zone();

    let mut ordered: Vec<&BathroomLog> = logs.iter().collect();
    ordered.sort_by_key(|log| (log.date, log.id));

    let days = window(today, window_days);
    let labels: Vec<String> = days.iter().map(|d| d.format("%a %d").to_string()).collect();

    let mut pee = EventSeries {
        labels: labels.clone(),
        data: vec![0; days.len()],
        ..Default::default()
    };
    let mut poop = EventSeries {
        labels,
        data: vec![0; days.len()],
        ..Default::default()
    };
    let mut consistency_counts = [0usize; Consistency::ALL.len()];

    for log in &ordered {
        let slot = day_slot(&days, zone.local_date(&log.date));

        if log.kind.counts_as_pee() {
            pee.times.push(log.date.to_rfc3339());
            if let Some(i) = slot {
                pee.data[i] += 1;
            }
        }

        if log.kind.counts_as_poop() {
            poop.times.push(log.date.to_rfc3339());
            if let Some(i) = slot {
                poop.data[i] += 1;
            }
            if let Some(consistency) = log.consistency {
                if let Some(i) = Consistency::ALL.iter().position(|c| *c == consistency) {
                    consistency_counts[i] += 1;
                }
            }
        }
    }

    let averages = DailyAverages {
        pee: average(&pee.data),
        poop: average(&poop.data),
    };

    let most_common_time = aggregator
        .summarize_instants(
            ordered.iter().filter(|l| l.kind.counts_as_pee()).map(|l| l.date),
            ordered.iter().filter(|l| l.kind.counts_as_poop()).map(|l| l.date),
        )
        .into();

    BathroomStats {
        pee,
        poop,
        consistency: ConsistencyDistribution {
            labels: Consistency::ALL.iter().map(|c| c.label().to_string()).collect(),
            data: consistency_counts.to_vec(),
        },
        averages,
        most_common_time,
    }
}

fn window(today: NaiveDate, window_days: usize) -> Vec<NaiveDate> {
    (0..window_days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back as u64)))
        .collect()
}

fn day_slot(days: &[NaiveDate], date: NaiveDate) -> Option<usize> {
    days.iter().position(|d| *d == date)
}

fn average(data: &[usize]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<usize>() as f64 / data.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::ZoneSetting;
    use crate::models::{BathroomKind, BathroomLogId, NewBathroomLog};
    use crate::services::time_of_day::InvalidTimestampPolicy;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    fn utc() -> HourOfDayAggregator {
        HourOfDayAggregator::new(ZoneSetting::Utc, InvalidTimestampPolicy::Skip)
    }

    fn log(id: i64, kind: BathroomKind, date: DateTime<Utc>) -> BathroomLog {
        NewBathroomLog::new(kind, date).into_log(BathroomLogId::new(id), date)
    }

    fn poop_with(id: i64, date: DateTime<Utc>, consistency: Consistency) -> BathroomLog {
        let mut input = NewBathroomLog::new(BathroomKind::Poop, date);
        input.consistency = Some(consistency);
        input.into_log(BathroomLogId::new(id), date)
    }

    fn jan(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
    }

    #[test]
    fn test_empty_logs() {
        let stats = compute_bathroom_stats(&[], &utc(), today(), DEFAULT_WINDOW_DAYS);

        assert!(stats.pee.times.is_empty());
        assert_eq!(stats.pee.data, vec![0; 7]);
        assert_eq!(stats.pee.labels.len(), 7);
        assert_eq!(stats.poop.data, vec![0; 7]);
        assert_eq!(stats.consistency.labels, vec!["Normal", "Soft", "Hard", "Watery"]);
        assert_eq!(stats.consistency.data, vec![0, 0, 0, 0]);
        assert_eq!(stats.averages.pee, 0.0);
        assert_eq!(stats.most_common_time.time, "N/A");
        assert_eq!(stats.most_common_time.description, "No data available");
    }

    #[test]
    fn test_labels_end_today() {
        let stats = compute_bathroom_stats(&[], &utc(), today(), DEFAULT_WINDOW_DAYS);
        assert_eq!(stats.pee.labels.first().unwrap(), "Mon 01");
        assert_eq!(stats.pee.labels.last().unwrap(), "Sun 07");
    }

    #[test]
    fn test_both_counts_for_each_kind() {
        let logs = vec![
            log(1, BathroomKind::Both, jan(7, 8, 5)),
            log(2, BathroomKind::Pee, jan(6, 9, 0)),
        ];
        let stats = compute_bathroom_stats(&logs, &utc(), today(), DEFAULT_WINDOW_DAYS);

        assert_eq!(stats.pee.times.len(), 2);
        assert_eq!(stats.poop.times.len(), 1);
        assert_eq!(stats.pee.data, vec![0, 0, 0, 0, 0, 1, 1]);
        assert_eq!(stats.poop.data, vec![0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(stats.poop.times[0], "2024-01-07T08:05:00+00:00");
    }

    #[test]
    fn test_times_are_chronological() {
        let logs = vec![
            log(1, BathroomKind::Pee, jan(5, 20, 0)),
            log(2, BathroomKind::Pee, jan(2, 7, 0)),
            log(3, BathroomKind::Pee, jan(4, 12, 0)),
        ];
        let stats = compute_bathroom_stats(&logs, &utc(), today(), DEFAULT_WINDOW_DAYS);
        let mut sorted = stats.pee.times.clone();
        sorted.sort();
        assert_eq!(stats.pee.times, sorted);
    }

    #[test]
    fn test_events_outside_window_only_feed_times() {
        let logs = vec![
            log(1, BathroomKind::Pee, jan(1, 8, 0)),
            log(2, BathroomKind::Pee, Utc.with_ymd_and_hms(2023, 12, 20, 8, 0, 0).unwrap()),
        ];
        let stats = compute_bathroom_stats(&logs, &utc(), today(), DEFAULT_WINDOW_DAYS);
        assert_eq!(stats.pee.times.len(), 2);
        assert_eq!(stats.pee.data.iter().sum::<usize>(), 1);
        assert!((stats.averages.pee - 1.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_consistency_distribution() {
        let logs = vec![
            poop_with(1, jan(3, 8, 0), Consistency::Normal),
            poop_with(2, jan(4, 8, 0), Consistency::Normal),
            poop_with(3, jan(5, 8, 0), Consistency::Watery),
            log(4, BathroomKind::Poop, jan(6, 8, 0)),
        ];
        let stats = compute_bathroom_stats(&logs, &utc(), today(), DEFAULT_WINDOW_DAYS);
        assert_eq!(stats.consistency.data, vec![2, 0, 0, 1]);
    }

    #[test]
    fn test_most_common_time_card() {
        let logs = vec![
            log(1, BathroomKind::Pee, jan(5, 18, 20)),
            log(2, BathroomKind::Poop, jan(6, 18, 45)),
            log(3, BathroomKind::Pee, jan(7, 7, 0)),
        ];
        let stats = compute_bathroom_stats(&logs, &utc(), today(), DEFAULT_WINDOW_DAYS);
        assert_eq!(stats.most_common_time.time, "6:20 PM");
        assert_eq!(stats.most_common_time.description, "Evening walk");
    }

    #[test]
    fn test_zone_moves_events_across_days() {
        let plus_two = ZoneSetting::Fixed(FixedOffset::east_opt(2 * 3600).unwrap());
        let aggregator = HourOfDayAggregator::new(plus_two, InvalidTimestampPolicy::Skip);
        // 23:30 UTC on the 6th is 01:30 on the 7th at +02:00
        let logs = vec![log(1, BathroomKind::Pee, jan(6, 23, 30))];

        let stats = compute_bathroom_stats(&logs, &aggregator, today(), DEFAULT_WINDOW_DAYS);
        assert_eq!(stats.pee.data, vec![0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(stats.most_common_time.time, "1:30 AM");
        assert_eq!(stats.most_common_time.description, "Night walk");
    }

    #[test]
    fn test_zero_window_is_one_day() {
        let logs = vec![log(1, BathroomKind::Pee, jan(7, 8, 0))];
        let stats = compute_bathroom_stats(&logs, &utc(), today(), 0);
        assert_eq!(stats.pee.data, vec![1]);
        assert_eq!(stats.averages.pee, 1.0);
    }

    #[test]
    fn test_oversized_window_is_capped() {
        let logs = vec![log(1, BathroomKind::Pee, jan(7, 8, 0))];
        let stats = compute_bathroom_stats(&logs, &utc(), today(), 200_000_000);
        assert_eq!(stats.pee.labels.len(), MAX_WINDOW_DAYS);
        assert_eq!(stats.pee.data.len(), MAX_WINDOW_DAYS);
        assert_eq!(stats.pee.data.last(), Some(&1));
    }

    #[test]
    fn test_window_stops_at_earliest_date() {
        let stats = compute_bathroom_stats(&[], &utc(), NaiveDate::MIN, MAX_WINDOW_DAYS);
        assert_eq!(stats.pee.labels.len(), 1);
        assert_eq!(stats.poop.data, vec![0]);
    }

    #[test]
    fn test_wire_format() {
        let stats = compute_bathroom_stats(&[], &utc(), today(), DEFAULT_WINDOW_DAYS);
        let value = serde_json::to_value(&stats).unwrap();
        assert!(value["pee"]["times"].is_array());
        assert!(value["poop"]["labels"].is_array());
        assert_eq!(value["mostCommonTime"]["time"], "N/A");
        assert!(value["averages"]["pee"].is_number());
    }
}
