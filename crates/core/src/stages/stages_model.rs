//! Stage domain models.

use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a bookable stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub location: String,
    pub max_capacity: i32,
}

/// Input model for creating a new stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStage {
    pub name: String,
    pub location: String,
    pub max_capacity: i32,
}

impl NewStage {
    /// Validates the new stage data.
    pub fn validate(&self) -> Result<()> {
        validate_stage_fields(&self.name, &self.location, self.max_capacity)
    }
}

/// Input model for replacing an existing stage's attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageUpdate {
    pub name: String,
    pub location: String,
    pub max_capacity: i32,
}

impl StageUpdate {
    /// Validates the stage update data.
    pub fn validate(&self) -> Result<()> {
        validate_stage_fields(&self.name, &self.location, self.max_capacity)
    }
}

fn validate_stage_fields(name: &str, location: &str, max_capacity: i32) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Stage name cannot be empty".to_string(),
        )));
    }
    if location.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Stage location cannot be empty".to_string(),
        )));
    }
    if max_capacity <= 0 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Stage maximum capacity must be positive".to_string(),
        )));
    }
    Ok(())
}
