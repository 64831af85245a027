//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::repository::FullRepository;
use crate::services::bathroom_stats::DEFAULT_WINDOW_DAYS;
use crate::services::time_of_day::HourOfDayAggregator;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Zone and invalid timestamp policy for request dates and statistics
    pub aggregator: HourOfDayAggregator,
    /// Days covered by the stats per-day series
    pub stats_window_days: usize,
}

impl AppState {
    /// Create a new application state with the given repository and default
    /// statistics settings.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            aggregator: HourOfDayAggregator::default(),
            stats_window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    /// Create application state using the statistics settings of `config`.
    pub fn from_config(repository: Arc<dyn FullRepository>, config: &AppConfig) -> Self {
        Self {
            repository,
            aggregator: config.aggregator(),
            stats_window_days: config.stats.window_days,
        }
    }

    pub fn with_aggregator(mut self, aggregator: HourOfDayAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }
}
