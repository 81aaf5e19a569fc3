//! Event repository and service traits.
//!
//! These traits define the contract for event operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use super::events_model::{
    Event, EventStatistics, EventUpdate, NewEvent, OccupancyWindow, SortOrder, StageAvailability,
};
use crate::errors::Result;

/// Trait defining the contract for Event repository operations.
///
/// Writes are guarded: the implementation re-checks the occupancy window of
/// the target stage inside the same transaction that persists the event, so
/// two concurrent writers can never both claim overlapping windows.
#[async_trait]
pub trait EventRepositoryTrait: Send + Sync {
    /// Inserts a new event.
    ///
    /// Fails with `StageNotFound` when the stage is gone and with
    /// `StageUnavailable` when the window is taken by the time of the write.
    async fn create(&self, new_event: NewEvent) -> Result<Event>;

    /// Applies `patch` to the stored event within a single write.
    ///
    /// The current row is read and patched inside the same transaction that
    /// persists it. When the start time or stage changes, the new window is
    /// checked against the other events on the target stage.
    async fn update(&self, event_id: &str, patch: EventUpdate) -> Result<Event>;

    /// Deletes an event by its ID, returning the number of deleted records.
    async fn delete(&self, event_id: &str) -> Result<usize>;

    /// Retrieves an event by its ID.
    fn find_by_id(&self, event_id: &str) -> Result<Option<Event>>;

    /// Lists every event.
    fn list(&self) -> Result<Vec<Event>>;

    /// Lists the events of one stage ordered by start time.
    fn list_by_stage(&self, stage_id: &str) -> Result<Vec<Event>>;

    /// Events starting within `[from, to]`, both ends inclusive.
    fn list_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> Result<Vec<Event>>;

    /// Events whose name contains `fragment`, case-insensitively.
    fn search_by_name(&self, fragment: &str) -> Result<Vec<Event>>;

    /// Events whose associated artist contains `fragment`, case-insensitively.
    fn search_by_artist(&self, fragment: &str) -> Result<Vec<Event>>;

    /// Events with `capacity >= min_capacity`.
    fn list_with_min_capacity(&self, min_capacity: i32) -> Result<Vec<Event>>;

    /// Events on `stage_id` starting in `(window.earliest_overlapping_start(), window.end)`.
    ///
    /// This is a superset filter; the overlap predicate itself is applied by
    /// the conflict detector.
    fn find_overlap_candidates(
        &self,
        stage_id: &str,
        window: &OccupancyWindow,
    ) -> Result<Vec<Event>>;
}

/// Trait defining the contract for Event service operations.
#[async_trait]
pub trait EventServiceTrait: Send + Sync {
    /// Schedules a new event after validating the stage and its availability.
    async fn create_event(&self, new_event: NewEvent) -> Result<Event>;

    /// Applies a partial update; re-checks the schedule only when the start
    /// time or stage changes.
    async fn update_event(&self, event_id: &str, patch: EventUpdate) -> Result<Event>;

    async fn delete_event(&self, event_id: &str) -> Result<()>;

    fn get_event(&self, event_id: &str) -> Result<Event>;

    /// All events ordered by start time.
    fn get_events(&self) -> Result<Vec<Event>>;

    fn search_events_by_name(&self, fragment: &str) -> Result<Vec<Event>>;
    fn get_events_by_artist(&self, fragment: &str) -> Result<Vec<Event>>;
    fn get_events_by_stage(&self, stage_id: &str) -> Result<Vec<Event>>;
    fn get_events_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> Result<Vec<Event>>;
    fn get_events_on(&self, day: NaiveDate) -> Result<Vec<Event>>;

    /// Events with at least `min_capacity`, largest first.
    fn get_events_with_min_capacity(&self, min_capacity: i32) -> Result<Vec<Event>>;

    fn get_events_sorted_by_date(&self, order: SortOrder) -> Result<Vec<Event>>;
    fn get_events_sorted_by_capacity(&self, order: SortOrder) -> Result<Vec<Event>>;

    /// Per-stage availability for the window starting at `anchor`.
    fn check_stage_availability(&self, anchor: NaiveDateTime) -> Result<Vec<StageAvailability>>;

    /// Free slots of one stage on `day`.
    fn stage_availability_for_day(&self, stage_id: &str, day: NaiveDate)
        -> Result<StageAvailability>;

    /// The full event history of a stage, ordered by start time.
    fn stage_schedule(&self, stage_id: &str) -> Result<Vec<Event>>;

    fn statistics(&self) -> Result<EventStatistics>;
}
