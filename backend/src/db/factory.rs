//! Repository factory for dependency injection.
//!
//! Creates repository instances from runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::config::AppConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryType {
    /// In-memory local repository
    #[default]
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("local", "memory")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" | "in-memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from the `REPOSITORY_TYPE` environment variable.
    ///
    /// Defaults to Local when unset or blank. Unrecognised values are
    /// rejected, as in [`AppConfig::load`].
    pub fn from_env() -> Result<Self, String> {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(val) if !val.trim().is_empty() => val.parse(),
            _ => Ok(Self::default()),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use pawtrack::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local);
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    pub fn create(repo_type: RepositoryType) -> Arc<dyn FullRepository> {
        match repo_type {
            RepositoryType::Local => Self::create_local(),
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ConfigurationError)` - If `REPOSITORY_TYPE` is unknown
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryType::from_env()
            .map(Self::create)
            .map_err(RepositoryError::configuration)
    }

    /// Create repository from application configuration.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FullRepository>)` - Repository instance
    /// * `Err(RepositoryError::ConfigurationError)` - If the configured type is unknown
    pub fn from_config(config: &AppConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config
            .repository_type()
            .map_err(|e| RepositoryError::configuration(e.to_string()))?;
        Ok(Self::create(repo_type))
    }
}
