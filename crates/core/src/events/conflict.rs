//! Conflict detection between occupancy windows on a stage.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::events_model::{Event, OccupancyWindow};
use super::events_traits::EventRepositoryTrait;
use crate::errors::Result;

/// Keeps the events whose occupancy overlaps `window`, skipping `exclude_event_id`.
///
/// Storage implementations call this from inside their write transaction so
/// the guarded write and the read-side check share one predicate.
pub fn conflicting_events(
    candidates: Vec<Event>,
    window: &OccupancyWindow,
    exclude_event_id: Option<&str>,
) -> Vec<Event> {
    candidates
        .into_iter()
        .filter(|event| exclude_event_id != Some(event.id.as_str()))
        .filter(|event| event.occupancy().overlaps(window))
        .collect()
}

/// Decides whether a stage is free for a candidate window.
#[derive(Clone)]
pub struct ConflictDetector {
    repository: Arc<dyn EventRepositoryTrait>,
}

impl ConflictDetector {
    pub fn new(repository: Arc<dyn EventRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// True if any event on `stage_id` overlaps `[candidate_start, candidate_end)`.
    pub fn has_conflict(
        &self,
        stage_id: &str,
        candidate_start: NaiveDateTime,
        candidate_end: NaiveDateTime,
    ) -> Result<bool> {
        let window = OccupancyWindow::new(candidate_start, candidate_end);
        Ok(!self.find_conflicts(stage_id, &window, None)?.is_empty())
    }

    /// Events on `stage_id` overlapping `window`, optionally ignoring one event
    /// (the one being rescheduled).
    pub fn find_conflicts(
        &self,
        stage_id: &str,
        window: &OccupancyWindow,
        exclude_event_id: Option<&str>,
    ) -> Result<Vec<Event>> {
        let candidates = self.repository.find_overlap_candidates(stage_id, window)?;
        Ok(conflicting_events(candidates, window, exclude_event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn event(id: &str, start: NaiveDateTime) -> Event {
        Event {
            id: id.to_string(),
            name: format!("Show {id}"),
            start_time: start,
            stage_id: "main".to_string(),
            stage_name: "Main".to_string(),
            associated_artist: "Artist".to_string(),
            capacity: 100,
            created_at: at(8, 0),
        }
    }

    #[test]
    fn keeps_only_overlapping_events() {
        let candidates = vec![event("a", at(18, 0)), event("b", at(20, 0))];
        let window = OccupancyWindow::starting_at(at(20, 30));
        let conflicts = conflicting_events(candidates, &window, None);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, "b");
    }

    #[test]
    fn excludes_event_by_identity() {
        let candidates = vec![event("a", at(20, 0))];
        let window = OccupancyWindow::starting_at(at(21, 0));
        assert!(conflicting_events(candidates.clone(), &window, Some("a")).is_empty());
        assert_eq!(conflicting_events(candidates, &window, Some("b")).len(), 1);
    }
}
