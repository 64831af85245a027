//! In-memory local repository implementation.
//!
//! All records live in ordered maps behind a single lock. Data does not
//! survive a restart.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{
    BathroomLog, BathroomLogId, BathroomLogPatch, Dog, DogId, DogPatch, FeedingLog, FeedingLogId,
    FeedingLogPatch, NewBathroomLog, NewDog, NewFeedingLog,
};

/// In-memory local repository.
///
/// Clones share the same underlying data.
///
/// # Example
/// ```
/// use pawtrack::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.dog_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    dogs: BTreeMap<DogId, Dog>,
    bathroom_logs: BTreeMap<BathroomLogId, BathroomLog>,
    feeding_logs: BTreeMap<FeedingLogId, FeedingLog>,

    // ID counters
    next_dog_id: DogId,
    next_bathroom_log_id: BathroomLogId,
    next_feeding_log_id: FeedingLogId,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            dogs: BTreeMap::new(),
            bathroom_logs: BTreeMap::new(),
            feeding_logs: BTreeMap::new(),
            next_dog_id: DogId(1),
            next_bathroom_log_id: BathroomLogId(1),
            next_feeding_log_id: FeedingLogId(1),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn dog_count(&self) -> usize {
        self.data.read().dogs.len()
    }

    pub fn bathroom_log_count(&self) -> usize {
        self.data.read().bathroom_logs.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }
}

impl LocalData {
    /// Reject a reference to a dog that is not stored.
    fn require_dog(&self, operation: &str, dog_id: Option<DogId>) -> RepositoryResult<()> {
        match dog_id {
            Some(id) if !self.dogs.contains_key(&id) => {
                Err(RepositoryError::validation_with_context(
                    format!("dogId {} does not refer to an existing dog", id),
                    ErrorContext::new(operation)
                        .with_entity("dog")
                        .with_entity_id(id),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(operation: &str, entity: &str, label: &str, id: impl ToString) -> RepositoryError {
    let id = id.to_string();
    RepositoryError::not_found_with_context(
        format!("{} {} not found", label, id),
        ErrorContext::new(operation)
            .with_entity(entity)
            .with_entity_id(id),
    )
}

/// Newest first; equal dates fall back to the most recently created.
fn newest_first<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, K)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl DogRepository for LocalRepository {
    async fn create_dog(&self, dog: NewDog) -> RepositoryResult<Dog> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = data.next_dog_id;
        data.next_dog_id = id.next();

        let dog = dog.into_dog(id);
        data.dogs.insert(id, dog.clone());
        Ok(dog)
    }

    async fn get_dog(&self, id: DogId) -> RepositoryResult<Dog> {
        self.check_health()?;
        self.data
            .read()
            .dogs
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("get_dog", "dog", "Dog", id))
    }

    async fn list_dogs(&self) -> RepositoryResult<Vec<Dog>> {
        self.check_health()?;
        Ok(self.data.read().dogs.values().cloned().collect())
    }

    async fn update_dog(&self, id: DogId, patch: DogPatch) -> RepositoryResult<Dog> {
        self.check_health()?;
        let mut data = self.data.write();
        let dog = data
            .dogs
            .get_mut(&id)
            .ok_or_else(|| not_found("update_dog", "dog", "Dog", id))?;
        patch.apply(dog);
        Ok(dog.clone())
    }

    async fn delete_dog(&self, id: DogId) -> RepositoryResult<DogRemoval> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.dogs.remove(&id).is_none() {
            return Err(not_found("delete_dog", "dog", "Dog", id));
        }

        let bathroom_before = data.bathroom_logs.len();
        data.bathroom_logs.retain(|_, log| log.dog_id != Some(id));
        let feeding_before = data.feeding_logs.len();
        data.feeding_logs.retain(|_, log| log.dog_id != Some(id));

        Ok(DogRemoval {
            bathroom_logs: bathroom_before - data.bathroom_logs.len(),
            feeding_logs: feeding_before - data.feeding_logs.len(),
        })
    }
}

#[async_trait]
impl BathroomLogRepository for LocalRepository {
    async fn create_bathroom_log(&self, log: NewBathroomLog) -> RepositoryResult<BathroomLog> {
        self.check_health()?;
        let mut data = self.data.write();
        data.require_dog("create_bathroom_log", log.dog_id)?;
        let id = data.next_bathroom_log_id;
        data.next_bathroom_log_id = id.next();

        let log = log.into_log(id, Utc::now());
        data.bathroom_logs.insert(id, log.clone());
        Ok(log)
    }

    async fn list_bathroom_logs(
        &self,
        dog_id: Option<DogId>,
    ) -> RepositoryResult<Vec<BathroomLog>> {
        self.check_health()?;
        let mut logs: Vec<BathroomLog> = self
            .data
            .read()
            .bathroom_logs
            .values()
            .filter(|log| dog_id.is_none() || log.dog_id == dog_id)
            .cloned()
            .collect();
        newest_first(&mut logs, |log| (log.date, log.id));
        Ok(logs)
    }

    async fn update_bathroom_log(
        &self,
        id: BathroomLogId,
        patch: BathroomLogPatch,
    ) -> RepositoryResult<BathroomLog> {
        self.check_health()?;
        let mut data = self.data.write();
        let log = data
            .bathroom_logs
            .get_mut(&id)
            .ok_or_else(|| not_found("update_bathroom_log", "bathroom_log", "Bathroom log", id))?;
        patch.apply(log);
        Ok(log.clone())
    }

    async fn delete_bathroom_log(&self, id: BathroomLogId) -> RepositoryResult<()> {
        self.check_health()?;
        self.data
            .write()
            .bathroom_logs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("delete_bathroom_log", "bathroom_log", "Bathroom log", id))
    }
}

#[async_trait]
impl FeedingLogRepository for LocalRepository {
    async fn create_feeding_log(&self, log: NewFeedingLog) -> RepositoryResult<FeedingLog> {
        self.check_health()?;
        let mut data = self.data.write();
        data.require_dog("create_feeding_log", log.dog_id)?;
        let id = data.next_feeding_log_id;
        data.next_feeding_log_id = id.next();

        let log = log.into_log(id, Utc::now());
        data.feeding_logs.insert(id, log.clone());
        Ok(log)
    }

    async fn list_feeding_logs(&self, dog_id: Option<DogId>) -> RepositoryResult<Vec<FeedingLog>> {
        self.check_health()?;
        let mut logs: Vec<FeedingLog> = self
            .data
            .read()
            .feeding_logs
            .values()
            .filter(|log| dog_id.is_none() || log.dog_id == dog_id)
            .cloned()
            .collect();
        newest_first(&mut logs, |log| (log.date, log.id));
        Ok(logs)
    }

    async fn update_feeding_log(
        &self,
        id: FeedingLogId,
        patch: FeedingLogPatch,
    ) -> RepositoryResult<FeedingLog> {
        self.check_health()?;
        let mut data = self.data.write();
        let log = data
            .feeding_logs
            .get_mut(&id)
            .ok_or_else(|| not_found("update_feeding_log", "feeding_log", "Feeding log", id))?;
        patch.apply(log);
        Ok(log.clone())
    }

    async fn delete_feeding_log(&self, id: FeedingLogId) -> RepositoryResult<()> {
        self.check_health()?;
        self.data
            .write()
            .feeding_logs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("delete_feeding_log", "feeding_log", "Feeding log", id))
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}
