#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use pawtrack::models::{BathroomKind, DogId, Gender, NewBathroomLog, NewDog, NewFeedingLog};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every variable read by `AppConfig::load`, cleared by [`with_clean_env`].
pub const CONFIG_VARS: [&str; 6] = [
    "PAWTRACK_CONFIG",
    "HOST",
    "PORT",
    "REPOSITORY_TYPE",
    "PAWTRACK_TIMEZONE",
    "PAWTRACK_INVALID_TIMESTAMPS",
];

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to the process
/// environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Like [`with_scoped_env`], but first removes every configuration variable
/// so the host environment cannot leak into the test.
pub fn with_clean_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let mut all: Vec<(&str, Option<&str>)> = CONFIG_VARS
        .iter()
        .filter(|key| !changes.iter().any(|(k, _)| k == *key))
        .map(|key| (*key, None))
        .collect();
    all.extend_from_slice(changes);
    with_scoped_env(&all, f)
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn new_dog(name: &str) -> NewDog {
    NewDog {
        name: name.to_string(),
        breed: "Beagle".to_string(),
        age: 3.0,
        weight: 11.0,
        gender: Gender::Male,
        owner_name: "Sam".to_string(),
        image_url: None,
    }
}

/// 2024-01-`day` at `hour:minute` UTC.
pub fn jan(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
}

pub fn bathroom(dog_id: DogId, kind: BathroomKind, date: DateTime<Utc>) -> NewBathroomLog {
    let mut log = NewBathroomLog::new(kind, date);
    log.dog_id = Some(dog_id);
    log
}

pub fn feeding(dog_id: DogId, date: DateTime<Utc>) -> NewFeedingLog {
    NewFeedingLog {
        dog_id: Some(dog_id),
        date,
        food_type: "kibble".to_string(),
        amount: "1 cup".to_string(),
        brand: None,
        notes: None,
    }
}
