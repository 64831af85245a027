//! High-level database service layer.
//!
//! Repository-agnostic operations shared by every caller. These functions
//! validate input before it reaches storage, keep related records consistent
//! (deleting a dog removes its logs) and log each mutation.
//!
//! # Usage
//!
//! ```no_run
//! use pawtrack::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let dogs = services::list_dogs(&repo).await?;
//!     println!("Found {} dogs", dogs.len());
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use log::{debug, info};

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::models::{
    BathroomLog, BathroomLogId, BathroomLogPatch, Dog, DogId, DogPatch, FeedingLog, FeedingLogId,
    FeedingLogPatch, NewBathroomLog, NewDog, NewFeedingLog,
};
use crate::services::bathroom_stats::{compute_bathroom_stats, BathroomStats};
use crate::services::time_of_day::HourOfDayAggregator;

fn invalid(operation: &str, entity: &str, message: String) -> RepositoryError {
    RepositoryError::validation_with_context(
        message,
        ErrorContext::new(operation).with_entity(entity),
    )
}

// ==================== Health ====================

/// Check if the repository is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Dogs ====================

pub async fn list_dogs<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Dog>> {
    repo.list_dogs().await
}

pub async fn get_dog<R: FullRepository + ?Sized>(repo: &R, id: DogId) -> RepositoryResult<Dog> {
    repo.get_dog(id).await
}

/// Validate and store a new dog profile.
pub async fn create_dog<R: FullRepository + ?Sized>(
    repo: &R,
    dog: NewDog,
) -> RepositoryResult<Dog> {
    dog.validate().map_err(|e| invalid("create_dog", "dog", e))?;

    let dog = repo.create_dog(dog).await?;
    info!("Created dog {} ({})", dog.id, dog.name);
    Ok(dog)
}

pub async fn update_dog<R: FullRepository + ?Sized>(
    repo: &R,
    id: DogId,
    patch: DogPatch,
) -> RepositoryResult<Dog> {
    patch
        .validate()
        .map_err(|e| invalid("update_dog", "dog", e))?;

    let dog = repo.update_dog(id, patch).await?;
    info!("Updated dog {}", id);
    Ok(dog)
}

/// Delete a dog together with all of its bathroom and feeding logs.
///
/// # Returns
/// * `Ok(())` if the dog existed and was removed
/// * `Err(RepositoryError::NotFound)` if no dog has this id; nothing is removed
pub async fn delete_dog<R: FullRepository + ?Sized>(repo: &R, id: DogId) -> RepositoryResult<()> {
    let removed = repo.delete_dog(id).await?;
    info!(
        "Deleted dog {} with {} bathroom logs and {} feeding logs",
        id, removed.bathroom_logs, removed.feeding_logs
    );
    Ok(())
}

// ==================== Bathroom logs ====================

/// Bathroom events, newest first, optionally for a single dog.
pub async fn list_bathroom_logs<R: FullRepository + ?Sized>(
    repo: &R,
    dog_id: Option<DogId>,
) -> RepositoryResult<Vec<BathroomLog>> {
    repo.list_bathroom_logs(dog_id).await
}

pub async fn create_bathroom_log<R: FullRepository + ?Sized>(
    repo: &R,
    log: NewBathroomLog,
) -> RepositoryResult<BathroomLog> {
    log.validate()
        .map_err(|e| invalid("create_bathroom_log", "bathroom_log", e))?;

    let log = repo.create_bathroom_log(log).await?;
    info!(
        "Logged {} event {} at {}",
        log.kind.as_str(),
        log.id,
        log.date.to_rfc3339()
    );
    Ok(log)
}

pub async fn update_bathroom_log<R: FullRepository + ?Sized>(
    repo: &R,
    id: BathroomLogId,
    patch: BathroomLogPatch,
) -> RepositoryResult<BathroomLog> {
    patch
        .validate()
        .map_err(|e| invalid("update_bathroom_log", "bathroom_log", e))?;

    let log = repo.update_bathroom_log(id, patch).await?;
    info!("Updated bathroom log {}", id);
    Ok(log)
}

pub async fn delete_bathroom_log<R: FullRepository + ?Sized>(
    repo: &R,
    id: BathroomLogId,
) -> RepositoryResult<()> {
    repo.delete_bathroom_log(id).await?;
    info!("Deleted bathroom log {}", id);
    Ok(())
}

/// Dashboard statistics over the stored bathroom events.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `dog_id` - Restrict to one dog, or `None` for all events
/// * `aggregator` - Zone and invalid timestamp policy for hour/day buckets
/// * `today` - Last day of the per-day window, in the aggregator's zone
/// * `window_days` - Length of the per-day window
pub async fn bathroom_stats<R: FullRepository + ?Sized>(
    repo: &R,
    dog_id: Option<DogId>,
    aggregator: &HourOfDayAggregator,
    today: NaiveDate,
    window_days: usize,
) -> RepositoryResult<BathroomStats> {
    let logs = repo.list_bathroom_logs(dog_id).await?;
    debug!(
        "Computing bathroom stats over {} logs (zone={}, window={} days)",
        logs.len(),
        aggregator.zone(),
        window_days
    );
    Ok(compute_bathroom_stats(&logs, aggregator, today, window_days))
}

// ==================== Feeding logs ====================

/// Feeding events, newest first, optionally for a single dog.
pub async fn list_feeding_logs<R: FullRepository + ?Sized>(
    repo: &R,
    dog_id: Option<DogId>,
) -> RepositoryResult<Vec<FeedingLog>> {
    repo.list_feeding_logs(dog_id).await
}

pub async fn create_feeding_log<R: FullRepository + ?Sized>(
    repo: &R,
    log: NewFeedingLog,
) -> RepositoryResult<FeedingLog> {
    log.validate()
        .map_err(|e| invalid("create_feeding_log", "feeding_log", e))?;

    let log = repo.create_feeding_log(log).await?;
    info!("Logged feeding {} ({} {})", log.id, log.amount, log.food_type);
    Ok(log)
}

pub async fn update_feeding_log<R: FullRepository + ?Sized>(
    repo: &R,
    id: FeedingLogId,
    patch: FeedingLogPatch,
) -> RepositoryResult<FeedingLog> {
    patch
        .validate()
        .map_err(|e| invalid("update_feeding_log", "feeding_log", e))?;

    let log = repo.update_feeding_log(id, patch).await?;
    info!("Updated feeding log {}", id);
    Ok(log)
}

pub async fn delete_feeding_log<R: FullRepository + ?Sized>(
    repo: &R,
    id: FeedingLogId,
) -> RepositoryResult<()> {
    repo.delete_feeding_log(id).await?;
    info!("Deleted feeding log {}", id);
    Ok(())
}
