use std::collections::BTreeMap;

use models::pet;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ServiceError;

/// Full pet record as returned to callers.
pub type Pet = pet::Model;

/// Payload for creating a pet. `name` and `type` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl PetCreate {
    pub fn new(name: impl Into<String>, pet_type: impl Into<String>, weight: Option<f64>) -> Self {
        Self { name: name.into(), pet_type: pet_type.into(), weight }
    }

    pub fn into_active_model(self) -> pet::ActiveModel {
        pet::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            pet_type: Set(self.pet_type),
            weight: Set(self.weight),
        }
    }
}

/// Partial update. The outer `Option` records whether a field was sent at
/// all; the inner one whether it was sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PetUpdate {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, rename = "type", deserialize_with = "present")]
    pub pet_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub weight: Option<Option<f64>>,
}

// Only called when the key is in the document, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PetUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Some(name.into()));
        self
    }

    pub fn with_type(mut self, pet_type: impl Into<String>) -> Self {
        self.pet_type = Some(Some(pet_type.into()));
        self
    }

    pub fn with_weight(mut self, weight: Option<f64>) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.pet_type.is_none() && self.weight.is_none()
    }

    /// `name` and `type` may be omitted but never cleared.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if matches!(self.name, Some(None)) {
            return Err(ServiceError::validation("name may not be null"));
        }
        if matches!(self.pet_type, Some(None)) {
            return Err(ServiceError::validation("type may not be null"));
        }
        Ok(())
    }

    /// Overlay the supplied fields onto `current`. Omitted fields stay
    /// unchanged and are not written back.
    pub fn merge(self, current: Pet) -> pet::ActiveModel {
        let mut am: pet::ActiveModel = current.into();
        if let Some(Some(name)) = self.name {
            am.name = Set(name);
        }
        if let Some(Some(pet_type)) = self.pet_type {
            am.pet_type = Set(pet_type);
        }
        if let Some(weight) = self.weight {
            am.weight = Set(weight);
        }
        am
    }
}

/// Aggregates computed on demand over all stored pets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetStatistics {
    pub total_pets: u64,
    /// Mean of the known weights, two decimals; `None` when no pet has one.
    pub average_weight: Option<f64>,
    pub type_distribution: BTreeMap<String, u64>,
}
