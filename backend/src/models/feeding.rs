use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bathroom::validate_notes;
use super::dog::{non_blank, require_text, DogId};
use crate::define_id_type;

define_id_type!(i64, FeedingLogId);

/// A stored feeding event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingLog {
    #[serde(rename = "_id")]
    pub id: FeedingLogId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog_id: Option<DogId>,
    pub date: DateTime<Utc>,
    pub food_type: String,
    /// Free-form quantity such as "1 cup" or "200 g"
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedingLog {
    pub dog_id: Option<DogId>,
    pub date: DateTime<Utc>,
    pub food_type: String,
    pub amount: String,
    pub brand: Option<String>,
    pub notes: Option<String>,
}

impl NewFeedingLog {
    pub fn validate(&self) -> Result<(), String> {
        require_text("foodType", &self.food_type)?;
        require_text("amount", &self.amount)?;
        validate_notes(self.notes.as_deref())
    }

    pub fn into_log(self, id: FeedingLogId, created_at: DateTime<Utc>) -> FeedingLog {
        FeedingLog {
            id,
            dog_id: self.dog_id,
            date: self.date,
            food_type: self.food_type.trim().to_string(),
            amount: self.amount.trim().to_string(),
            brand: non_blank(self.brand),
            notes: non_blank(self.notes),
            created_at,
        }
    }
}

/// Partial update of a feeding event. Empty `brand`/`notes` clear the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedingLogPatch {
    pub date: Option<DateTime<Utc>>,
    pub food_type: Option<String>,
    pub amount: Option<String>,
    pub brand: Option<String>,
    pub notes: Option<String>,
}

impl FeedingLogPatch {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(food_type) = &self.food_type {
            require_text("foodType", food_type)?;
        }
        if let Some(amount) = &self.amount {
            require_text("amount", amount)?;
        }
        validate_notes(self.notes.as_deref())
    }

    pub fn apply(self, log: &mut FeedingLog) {
        if let Some(date) = self.date {
            log.date = date;
        }
        if let Some(food_type) = self.food_type {
            log.food_type = food_type.trim().to_string();
        }
        if let Some(amount) = self.amount {
            log.amount = amount.trim().to_string();
        }
        if self.brand.is_some() {
            log.brand = non_blank(self.brand);
        }
        if self.notes.is_some() {
            log.notes = non_blank(self.notes);
        }
    }
}
