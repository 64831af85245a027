//! Service layer for dashboard computations.
//!
//! Pure functions over already-loaded records. Persistence and request
//! handling live in [`crate::db`] and [`crate::http`].

pub mod bathroom_stats;
pub mod time_of_day;

pub use bathroom_stats::{compute_bathroom_stats, BathroomStats, DEFAULT_WINDOW_DAYS};
pub use time_of_day::{
    describe_hour, select_dominant_hour, AggregationResult, HourBucket, HourHistogram,
    HourOfDay, HourOfDayAggregator, InvalidTimestampPolicy, MostCommonTime, TimeOfDayError,
};
