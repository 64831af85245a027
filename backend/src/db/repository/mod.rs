//! Repository trait definitions for storage operations.
//!
//! Storage is split into one focused trait per record type:
//!
//! - [`DogRepository`]: dog profiles
//! - [`BathroomLogRepository`]: bathroom events
//! - [`FeedingLogRepository`]: feeding events
//!
//! A complete backend implements all three plus [`FullRepository::health_check`].
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let dogs = repo.list_dogs().await?;
//!     let logs = repo.list_bathroom_logs(Some(dogs[0].id)).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Thread Safety
//! Implementations must be `Send + Sync` so a single instance can be shared
//! across request handlers behind an `Arc`.

pub mod error;

use async_trait::async_trait;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::models::{
    BathroomLog, BathroomLogId, BathroomLogPatch, Dog, DogId, DogPatch, FeedingLog, FeedingLogId,
    FeedingLogPatch, NewBathroomLog, NewDog, NewFeedingLog,
};

/// Logs removed together with a dog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DogRemoval {
    pub bathroom_logs: usize,
    pub feeding_logs: usize,
}

/// Storage for dog profiles.
#[async_trait]
pub trait DogRepository: Send + Sync {
    /// Store a new dog and assign it an id.
    async fn create_dog(&self, dog: NewDog) -> RepositoryResult<Dog>;

    /// Retrieve a dog by id.
    ///
    /// # Returns
    /// * `Ok(Dog)` - The stored profile
    /// * `Err(RepositoryError::NotFound)` - If no dog has this id
    async fn get_dog(&self, id: DogId) -> RepositoryResult<Dog>;

    /// All dogs in insertion order.
    async fn list_dogs(&self) -> RepositoryResult<Vec<Dog>>;

    /// Apply a partial update and return the updated profile.
    async fn update_dog(&self, id: DogId, patch: DogPatch) -> RepositoryResult<Dog>;

    /// Remove a dog together with every bathroom and feeding event that
    /// references it, as one atomic step.
    ///
    /// # Returns
    /// * `Ok(DogRemoval)` - How many logs went with the dog
    /// * `Err(RepositoryError::NotFound)` - If no dog has this id; nothing is removed
    async fn delete_dog(&self, id: DogId) -> RepositoryResult<DogRemoval>;
}

/// Storage for bathroom events.
#[async_trait]
pub trait BathroomLogRepository: Send + Sync {
    /// Store a new event.
    ///
    /// A `dog_id` naming no stored dog fails with
    /// `RepositoryError::ValidationError`. The check and the insert are
    /// atomic with respect to [`DogRepository::delete_dog`].
    async fn create_bathroom_log(&self, log: NewBathroomLog) -> RepositoryResult<BathroomLog>;

    /// Bathroom events, newest first, optionally restricted to one dog.
    async fn list_bathroom_logs(&self, dog_id: Option<DogId>)
        -> RepositoryResult<Vec<BathroomLog>>;

    async fn update_bathroom_log(
        &self,
        id: BathroomLogId,
        patch: BathroomLogPatch,
    ) -> RepositoryResult<BathroomLog>;

    async fn delete_bathroom_log(&self, id: BathroomLogId) -> RepositoryResult<()>;
}

/// Storage for feeding events.
#[async_trait]
pub trait FeedingLogRepository: Send + Sync {
    /// Store a new event. Same dog reference rule as
    /// [`BathroomLogRepository::create_bathroom_log`].
    async fn create_feeding_log(&self, log: NewFeedingLog) -> RepositoryResult<FeedingLog>;

    /// Feeding events, newest first, optionally restricted to one dog.
    async fn list_feeding_logs(&self, dog_id: Option<DogId>) -> RepositoryResult<Vec<FeedingLog>>;

    async fn update_feeding_log(
        &self,
        id: FeedingLogId,
        patch: FeedingLogPatch,
    ) -> RepositoryResult<FeedingLog>;

    async fn delete_feeding_log(&self, id: FeedingLogId) -> RepositoryResult<()>;
}

/// Complete storage backend.
#[async_trait]
pub trait FullRepository: DogRepository + BathroomLogRepository + FeedingLogRepository {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;
}
