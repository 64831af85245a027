//! Storage layer for dog profiles and care logs.
//!
//! Abstractions for storage via the Repository pattern, so backends can be
//! swapped without touching handlers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! │  - Input validation                                     │
//! │  - Cascading deletes                                    │
//! │  - Dashboard statistics                                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use pawtrack::db::{services, RepositoryFactory, RepositoryType};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::create(RepositoryType::Local);
//!     let dogs = services::list_dogs(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    BathroomLogRepository, DogRemoval, DogRepository, ErrorContext, FeedingLogRepository,
    FullRepository, RepositoryError, RepositoryResult,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

use crate::config::AppConfig;

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton from the `REPOSITORY_TYPE`
/// environment variable. Later calls are no-ops.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::from_env()
        .context("Failed to create repository from REPOSITORY_TYPE")?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Initialize the global repository singleton from application configuration.
/// Later calls are no-ops.
pub fn init_repository_with(config: &AppConfig) -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::from_config(config)
        .context("Failed to create repository from configuration")?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance, initializing it from
/// the environment on first use.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        init_repository()?;
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
