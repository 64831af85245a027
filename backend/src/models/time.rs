//! Timestamp parsing and time zone handling.
//!
//! Log entries arrive with either an absolute RFC 3339 timestamp
//! (`2024-01-01T08:05:00Z`, `2024-01-01T08:05:00+02:00`) or a bare wall-clock
//! value as produced by an HTML `datetime-local` input (`2024-01-01T08:05`).
//! Bare values are interpreted in the configured [`ZoneSetting`], absolute
//! values are converted into it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Accepted layouts for timestamps without an offset, tried in order.
const WALL_CLOCK_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A timestamp string that could not be turned into a point in time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {value:?}: {reason}")]
pub struct InvalidTimestamp {
    /// The raw input as received
    pub value: String,
    /// Why it was rejected
    pub reason: String,
}

impl InvalidTimestamp {
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result of parsing a raw timestamp string, before any zone is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    /// Carried an explicit offset (or `Z`)
    Absolute(DateTime<FixedOffset>),
    /// Wall-clock reading with no offset information
    WallClock(NaiveDateTime),
}

/// Parse a raw timestamp string without interpreting it in any zone.
pub fn parse_timestamp(raw: &str) -> Result<ParsedTimestamp, InvalidTimestamp> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidTimestamp::new(raw, "empty timestamp"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ParsedTimestamp::Absolute(dt));
    }

    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(ParsedTimestamp::WallClock)
        .ok_or_else(|| {
            InvalidTimestamp::new(raw, "expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS] format")
        })
}

/// Time zone used to derive wall-clock hours and calendar days.
///
/// `Local` follows the host's zone (including DST changes); `Utc` and
/// `Fixed` give results that do not depend on where the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneSetting {
    Utc,
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl ZoneSetting {
    /// Wall-clock reading of `instant` in this zone.
    pub fn wall_clock(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            ZoneSetting::Utc => instant.naive_utc(),
            ZoneSetting::Local => instant.with_timezone(&Local).naive_local(),
            ZoneSetting::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Calendar date of `instant` in this zone.
    pub fn local_date(&self, instant: &DateTime<Utc>) -> NaiveDate {
        self.wall_clock(instant).date()
    }

    /// Map a wall-clock reading in this zone back to an instant.
    ///
    /// Returns `None` for readings skipped by a DST transition. Ambiguous
    /// readings resolve to the earlier instant.
    pub fn resolve(&self, wall_clock: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            ZoneSetting::Utc => Some(Utc.from_utc_datetime(wall_clock)),
            ZoneSetting::Local => Local
                .from_local_datetime(wall_clock)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            ZoneSetting::Fixed(offset) => offset
                .from_local_datetime(wall_clock)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// Wall-clock reading of a raw timestamp string in this zone.
    pub fn wall_clock_of(&self, raw: &str) -> Result<NaiveDateTime, InvalidTimestamp> {
        match parse_timestamp(raw)? {
            ParsedTimestamp::Absolute(dt) => Ok(self.wall_clock(&dt.with_timezone(&Utc))),
            ParsedTimestamp::WallClock(naive) => Ok(naive),
        }
    }

    /// Instant denoted by a raw timestamp string in this zone.
    pub fn parse_instant(&self, raw: &str) -> Result<DateTime<Utc>, InvalidTimestamp> {
        match parse_timestamp(raw)? {
            ParsedTimestamp::Absolute(dt) => Ok(dt.with_timezone(&Utc)),
            ParsedTimestamp::WallClock(naive) => self.resolve(&naive).ok_or_else(|| {
                InvalidTimestamp::new(
                    raw,
                    format!("wall-clock time does not exist in zone {}", self),
                )
            }),
        }
    }
}

impl FromStr for ZoneSetting {
    type Err = String;

    /// Parse a zone setting.
    ///
    /// Accepts `utc`, `z`, `local`, or a fixed offset such as `+02:00`,
    /// `-0530` or `+02`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" | "z" => return Ok(Self::Utc),
            "local" => return Ok(Self::Local),
            _ => {}
        }

        parse_fixed_offset(trimmed)
            .map(|offset| {
                if offset.local_minus_utc() == 0 {
                    Self::Utc
                } else {
                    Self::Fixed(offset)
                }
            })
            .ok_or_else(|| format!("Unknown time zone setting: {}", s))
    }
}

fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl fmt::Display for ZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneSetting::Utc => write!(f, "utc"),
            ZoneSetting::Local => write!(f, "local"),
            ZoneSetting::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl Serialize for ZoneSetting {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ZoneSetting {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
