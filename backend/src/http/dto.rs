//! Data Transfer Objects for the HTTP API.
//!
//! Stored records ([`Dog`], [`BathroomLog`], [`FeedingLog`]) already derive
//! the wire format and are returned as-is. Requests for logs carry raw
//! timestamp strings which are resolved in the configured zone here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::models::{BathroomLog, Dog, DogPatch, FeedingLog, NewDog};
pub use crate::services::bathroom_stats::BathroomStats;

use crate::models::time::{InvalidTimestamp, ZoneSetting};
use crate::models::{
    BathroomKind, BathroomLogPatch, Consistency, DogId, FeedingLogPatch, NewBathroomLog,
    NewFeedingLog, StoolColor,
};

/// Success envelope: `{ "success": true, "data": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository status
    pub database: String,
}

/// Body returned by DELETE endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    #[serde(rename = "_id")]
    pub id: i64,
    pub deleted: bool,
}

impl DeletedResponse {
    pub fn new(id: i64) -> Self {
        Self { id, deleted: true }
    }
}

/// `?dogId=` filter shared by list and stats endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DogFilter {
    #[serde(default, rename = "dogId")]
    pub dog_id: Option<i64>,
}

impl DogFilter {
    pub fn dog_id(&self) -> Option<DogId> {
        self.dog_id.map(DogId::new)
    }
}

fn resolve(
    zone: ZoneSetting,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, InvalidTimestamp> {
    raw.map(|value| zone.parse_instant(value)).transpose()
}

/// Request body for POST /api/bathroom-logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBathroomLogRequest {
    #[serde(default)]
    pub dog_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: BathroomKind,
    /// RFC 3339 or wall-clock timestamp; defaults to the time of the request
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub consistency: Option<Consistency>,
    #[serde(default)]
    pub color: Option<StoolColor>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateBathroomLogRequest {
    pub fn into_new_log(
        self,
        zone: ZoneSetting,
        now: DateTime<Utc>,
    ) -> Result<NewBathroomLog, InvalidTimestamp> {
        let date = resolve(zone, self.date.as_deref())?.unwrap_or(now);
        Ok(NewBathroomLog {
            dog_id: self.dog_id.map(DogId::new),
            kind: self.kind,
            date,
            consistency: self.consistency,
            color: self.color,
            notes: self.notes,
        })
    }
}

/// Request body for PATCH /api/bathroom-logs/{id}.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBathroomLogRequest {
    #[serde(default, rename = "type")]
    pub kind: Option<BathroomKind>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub consistency: Option<Consistency>,
    #[serde(default)]
    pub color: Option<StoolColor>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateBathroomLogRequest {
    pub fn into_patch(self, zone: ZoneSetting) -> Result<BathroomLogPatch, InvalidTimestamp> {
        Ok(BathroomLogPatch {
            kind: self.kind,
            date: resolve(zone, self.date.as_deref())?,
            consistency: self.consistency,
            color: self.color,
            notes: self.notes,
        })
    }
}

/// Feeding amounts arrive either as text ("1 cup") or as a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(f64),
}

impl From<AmountInput> for String {
    fn from(amount: AmountInput) -> Self {
        match amount {
            AmountInput::Text(text) => text,
            AmountInput::Number(n) => n.to_string(),
        }
    }
}

/// Request body for POST /api/feeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedingLogRequest {
    #[serde(default)]
    pub dog_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    pub food_type: String,
    pub amount: AmountInput,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateFeedingLogRequest {
    pub fn into_new_log(
        self,
        zone: ZoneSetting,
        now: DateTime<Utc>,
    ) -> Result<NewFeedingLog, InvalidTimestamp> {
        let date = resolve(zone, self.date.as_deref())?.unwrap_or(now);
        Ok(NewFeedingLog {
            dog_id: self.dog_id.map(DogId::new),
            date,
            food_type: self.food_type,
            amount: self.amount.into(),
            brand: self.brand,
            notes: self.notes,
        })
    }
}

/// Request body for PATCH /api/feeding/{id}.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedingLogRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub food_type: Option<String>,
    #[serde(default)]
    pub amount: Option<AmountInput>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateFeedingLogRequest {
    pub fn into_patch(self, zone: ZoneSetting) -> Result<FeedingLogPatch, InvalidTimestamp> {
        Ok(FeedingLogPatch {
            date: resolve(zone, self.date.as_deref())?,
            food_type: self.food_type,
            amount: self.amount.map(Into::into),
            brand: self.brand,
            notes: self.notes,
        })
    }
}
