//! Database models for events.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use festival_core::events::{Event, NewEvent};

use crate::stages::StageDB;

/// Database model for events
#[derive(
    Queryable,
    Identifiable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(StageDB, foreign_key = stage_id))]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct EventDB {
    pub id: String,
    pub name: String,
    pub start_time: NaiveDateTime,
    pub stage_id: String,
    pub associated_artist: String,
    pub capacity: i32,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new event
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::events)]
#[serde(rename_all = "camelCase")]
pub struct NewEventDB {
    pub id: String,
    pub name: String,
    pub start_time: NaiveDateTime,
    pub stage_id: String,
    pub associated_artist: String,
    pub capacity: i32,
    pub created_at: NaiveDateTime,
}

impl EventDB {
    /// Builds the domain event; the stage name comes from the joined stage row.
    pub fn into_event(self, stage_name: String) -> Event {
        Event {
            id: self.id,
            name: self.name,
            start_time: self.start_time,
            stage_id: self.stage_id,
            stage_name,
            associated_artist: self.associated_artist,
            capacity: self.capacity,
            created_at: self.created_at,
        }
    }
}

impl From<Event> for EventDB {
    fn from(domain: Event) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            start_time: domain.start_time,
            stage_id: domain.stage_id,
            associated_artist: domain.associated_artist,
            capacity: domain.capacity,
            created_at: domain.created_at,
        }
    }
}

impl NewEventDB {
    pub fn new(id: String, domain: NewEvent, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            name: domain.name,
            start_time: domain.start_time,
            stage_id: domain.stage_id,
            associated_artist: domain.associated_artist,
            capacity: domain.capacity,
            created_at,
        }
    }
}
