use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dog::{non_blank, DogId};
use crate::define_id_type;

define_id_type!(i64, BathroomLogId);

/// Longest accepted free-text note, in characters.
pub const MAX_NOTES_LEN: usize = 500;

/// What happened during a bathroom event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BathroomKind {
    Pee,
    Poop,
    Both,
}

impl BathroomKind {
    pub fn counts_as_pee(&self) -> bool {
        matches!(self, BathroomKind::Pee | BathroomKind::Both)
    }

    pub fn counts_as_poop(&self) -> bool {
        matches!(self, BathroomKind::Poop | BathroomKind::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BathroomKind::Pee => "pee",
            BathroomKind::Poop => "poop",
            BathroomKind::Both => "both",
        }
    }
}

/// Stool consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consistency {
    Normal,
    Soft,
    Hard,
    Watery,
}

impl Consistency {
    pub const ALL: [Consistency; 4] = [
        Consistency::Normal,
        Consistency::Soft,
        Consistency::Hard,
        Consistency::Watery,
    ];

    /// Chart label
    pub fn label(&self) -> &'static str {
        match self {
            Consistency::Normal => "Normal",
            Consistency::Soft => "Soft",
            Consistency::Hard => "Hard",
            Consistency::Watery => "Watery",
        }
    }
}

/// Stool color. The entry form spells dark brown as `"dark brown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoolColor {
    Brown,
    #[serde(alias = "dark brown", alias = "dark")]
    DarkBrown,
    Black,
    Red,
    Yellow,
    Green,
}

/// A stored bathroom event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BathroomLog {
    #[serde(rename = "_id")]
    pub id: BathroomLogId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog_id: Option<DogId>,
    #[serde(rename = "type")]
    pub kind: BathroomKind,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency: Option<Consistency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StoolColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BathroomLog {
    /// Stool details only make sense when the event includes a poop.
    fn normalize(&mut self) {
        if !self.kind.counts_as_poop() {
            self.consistency = None;
            self.color = None;
        }
    }
}

/// A bathroom event ready to be stored, with its date already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBathroomLog {
    pub dog_id: Option<DogId>,
    pub kind: BathroomKind,
    pub date: DateTime<Utc>,
    pub consistency: Option<Consistency>,
    pub color: Option<StoolColor>,
    pub notes: Option<String>,
}

impl NewBathroomLog {
    pub fn new(kind: BathroomKind, date: DateTime<Utc>) -> Self {
        Self {
            dog_id: None,
            kind,
            date,
            consistency: None,
            color: None,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_notes(self.notes.as_deref())
    }

    pub fn into_log(self, id: BathroomLogId, created_at: DateTime<Utc>) -> BathroomLog {
        let mut log = BathroomLog {
            id,
            dog_id: self.dog_id,
            kind: self.kind,
            date: self.date,
            consistency: self.consistency,
            color: self.color,
            notes: non_blank(self.notes),
            created_at,
        };
        log.normalize();
        log
    }
}

/// Partial update of a bathroom event. An empty `notes` clears the note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BathroomLogPatch {
    pub kind: Option<BathroomKind>,
    pub date: Option<DateTime<Utc>>,
    pub consistency: Option<Consistency>,
    pub color: Option<StoolColor>,
    pub notes: Option<String>,
}

impl BathroomLogPatch {
    pub fn validate(&self) -> Result<(), String> {
        validate_notes(self.notes.as_deref())
    }

    pub fn apply(self, log: &mut BathroomLog) {
        if let Some(kind) = self.kind {
            log.kind = kind;
        }
        if let Some(date) = self.date {
            log.date = date;
        }
        if self.consistency.is_some() {
            log.consistency = self.consistency;
        }
        if self.color.is_some() {
            log.color = self.color;
        }
        if self.notes.is_some() {
            log.notes = non_blank(self.notes);
        }
        log.normalize();
    }
}

pub(crate) fn validate_notes(notes: Option<&str>) -> Result<(), String> {
    match notes {
        Some(text) if text.chars().count() > MAX_NOTES_LEN => Err(format!(
            "notes must be at most {} characters, got {}",
            MAX_NOTES_LEN,
            text.chars().count()
        )),
        _ => Ok(()),
    }
}
