//! # PawTrack Backend
//!
//! Pet-care tracking backend: dog profiles, bathroom and feeding logs, and
//! the statistics behind the dashboard charts.
//!
//! ## Architecture
//!
//! - [`models`]: Records, identifiers, timestamp parsing and zone handling
//! - [`services`]: Pure computations: hour-of-day aggregation and bathroom statistics
//! - [`db`]: Repository pattern, in-memory storage and the service layer over it
//! - [`config`]: `pawtrack.toml` and environment configuration
//! - [`http`]: Axum-based REST API (feature `http-server`)
//!
//! ## Most Common Time
//!
//! ```
//! use pawtrack::models::time::ZoneSetting;
//! use pawtrack::services::{HourOfDayAggregator, InvalidTimestampPolicy};
//!
//! let aggregator = HourOfDayAggregator::new(ZoneSetting::Utc, InvalidTimestampPolicy::Skip);
//! let result = aggregator
//!     .summarize(["2024-01-01T08:05:00Z", "2024-01-02T08:40:00Z"], ["2024-01-02T19:00:00Z"])
//!     .unwrap();
//! assert_eq!(result.display_time, "8:05 AM");
//! assert_eq!(result.description, "Morning walk");
//! ```

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
