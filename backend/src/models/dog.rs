use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(i64, DogId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A stored dog profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    #[serde(rename = "_id")]
    pub id: DogId,
    pub name: String,
    pub breed: String,
    /// Age in years
    pub age: f64,
    /// Weight in kilograms
    pub weight: f64,
    pub gender: Gender,
    pub owner_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Dog profile as submitted for creation, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDog {
    pub name: String,
    pub breed: String,
    pub age: f64,
    pub weight: f64,
    pub gender: Gender,
    pub owner_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewDog {
    /// Check required fields and numeric ranges.
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        require_text("breed", &self.breed)?;
        require_text("ownerName", &self.owner_name)?;
        require_non_negative("age", self.age)?;
        require_non_negative("weight", self.weight)?;
        Ok(())
    }

    pub fn into_dog(self, id: DogId) -> Dog {
        Dog {
            id,
            name: self.name.trim().to_string(),
            breed: self.breed.trim().to_string(),
            age: self.age,
            weight: self.weight,
            gender: self.gender,
            owner_name: self.owner_name.trim().to_string(),
            image_url: non_blank(self.image_url),
        }
    }
}

/// Partial update of a dog profile; absent fields are left unchanged.
///
/// An empty `imageUrl` clears the stored image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DogPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl DogPatch {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(breed) = &self.breed {
            require_text("breed", breed)?;
        }
        if let Some(owner) = &self.owner_name {
            require_text("ownerName", owner)?;
        }
        if let Some(age) = self.age {
            require_non_negative("age", age)?;
        }
        if let Some(weight) = self.weight {
            require_non_negative("weight", weight)?;
        }
        Ok(())
    }

    pub fn apply(self, dog: &mut Dog) {
        if let Some(name) = self.name {
            dog.name = name.trim().to_string();
        }
        if let Some(breed) = self.breed {
            dog.breed = breed.trim().to_string();
        }
        if let Some(age) = self.age {
            dog.age = age;
        }
        if let Some(weight) = self.weight {
            dog.weight = weight;
        }
        if let Some(gender) = self.gender {
            dog.gender = gender;
        }
        if let Some(owner) = self.owner_name {
            dog.owner_name = owner.trim().to_string();
        }
        if self.image_url.is_some() {
            dog.image_url = non_blank(self.image_url);
        }
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(())
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be a non-negative number, got {}", field, value))
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
