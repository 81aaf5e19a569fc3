//! Database models for stages.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use festival_core::stages::{NewStage, Stage, StageUpdate};

/// Database model for stages
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::stages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct StageDB {
    pub id: String,
    pub name: String,
    pub location: String,
    pub max_capacity: i32,
}

/// Database model for creating a new stage
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::stages)]
#[serde(rename_all = "camelCase")]
pub struct NewStageDB {
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    pub max_capacity: i32,
}

impl From<StageDB> for Stage {
    fn from(db: StageDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            location: db.location,
            max_capacity: db.max_capacity,
        }
    }
}

impl From<NewStage> for NewStageDB {
    fn from(domain: NewStage) -> Self {
        Self {
            id: None,
            name: domain.name,
            location: domain.location,
            max_capacity: domain.max_capacity,
        }
    }
}

impl StageDB {
    pub fn from_update(stage_id: String, update: StageUpdate) -> Self {
        Self {
            id: stage_id,
            name: update.name,
            location: update.location,
            max_capacity: update.max_capacity,
        }
    }
}
