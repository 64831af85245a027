//! Application configuration.
//!
//! Settings come from an optional `pawtrack.toml` file, then environment
//! variables override individual values:
//!
//! | Variable | Setting |
//! |---|---|
//! | `PAWTRACK_CONFIG` | explicit config file path |
//! | `HOST`, `PORT` | `[server] host`, `port` |
//! | `REPOSITORY_TYPE` | `[repository] type` |
//! | `PAWTRACK_TIMEZONE` | `[stats] timezone` |
//! | `PAWTRACK_INVALID_TIMESTAMPS` | `[stats] invalid_timestamps` |
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [repository]
//! type = "local"
//!
//! [stats]
//! timezone = "+02:00"
//! invalid_timestamps = "skip"
//! window_days = 7
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::db::factory::RepositoryType;
use crate::models::time::ZoneSetting;
use crate::services::bathroom_stats::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::services::time_of_day::{HourOfDayAggregator, InvalidTimestampPolicy};

/// File name searched for by [`AppConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "pawtrack.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub stats: StatsSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Repository type settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

/// Dashboard statistics settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSettings {
    /// Zone used for hour-of-day and day buckets
    #[serde(default)]
    pub timezone: ZoneSetting,
    #[serde(default)]
    pub invalid_timestamps: InvalidTimestampPolicy,
    /// Days covered by the per-day series
    #[serde(default = "default_window_days")]
    pub window_days: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_window_days() -> usize {
    DEFAULT_WINDOW_DAYS
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            timezone: ZoneSetting::default(),
            invalid_timestamps: InvalidTimestampPolicy::default(),
            window_days: default_window_days(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful; missing sections take their defaults
    /// * `Err(ConfigError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `pawtrack.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(AppConfig))` if a file was found and parsed
    /// * `Ok(None)` if no file exists in any of the locations
    /// * `Err(ConfigError)` on read or parse errors
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Resolve the effective configuration for the process.
    ///
    /// Uses `PAWTRACK_CONFIG` when set (the file must exist), otherwise the
    /// default search locations, otherwise built-in defaults. Environment
    /// overrides are applied last.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("PAWTRACK_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings from environment variables.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(host) = env_value("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_value("PORT") {
            self.server.port = parse_value("PORT", &port)?;
        }
        if let Some(repo_type) = env_value("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Some(zone) = env_value("PAWTRACK_TIMEZONE") {
            self.stats.timezone = parse_value("PAWTRACK_TIMEZONE", &zone)?;
        }
        if let Some(policy) = env_value("PAWTRACK_INVALID_TIMESTAMPS") {
            self.stats.invalid_timestamps = parse_value("PAWTRACK_INVALID_TIMESTAMPS", &policy)?;
        }
        Ok(())
    }

    /// Check values that deserialize fine but are unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.repository_type()?;
        if !(1..=MAX_WINDOW_DAYS).contains(&self.stats.window_days) {
            return Err(ConfigError::InvalidValue {
                key: "stats.window_days".to_string(),
                message: format!(
                    "must be between 1 and {}, got {}",
                    MAX_WINDOW_DAYS, self.stats.window_days
                ),
            });
        }
        Ok(())
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, ConfigError> {
        RepositoryType::from_str(&self.repository.repo_type).map_err(|message| {
            ConfigError::InvalidValue {
                key: "repository.type".to_string(),
                message,
            }
        })
    }

    /// Aggregator configured with the stats zone and invalid timestamp policy.
    pub fn aggregator(&self) -> HourOfDayAggregator {
        HourOfDayAggregator::new(self.stats.timezone, self.stats.invalid_timestamps)
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}
