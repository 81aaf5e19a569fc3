//! Slot planning for stages.
//!
//! The planning day runs from 09:00 to 23:00 and is cut into back-to-back
//! slots of one event duration each.

use chrono::{NaiveDate, NaiveDateTime};

use super::conflict::ConflictDetector;
use super::events_constants::{event_duration, PLANNING_DAY_END_HOUR, PLANNING_DAY_START_HOUR};
use super::events_model::{OccupancyWindow, StageAvailability};
use crate::errors::Result;
use crate::stages::Stage;

/// Candidate slots for `day` in chronological order.
pub fn slot_grid(day: NaiveDate) -> Vec<OccupancyWindow> {
    let (Some(day_start), Some(day_end)) = (
        day.and_hms_opt(PLANNING_DAY_START_HOUR, 0, 0),
        day.and_hms_opt(PLANNING_DAY_END_HOUR, 0, 0),
    ) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    let mut current = day_start;
    while current + event_duration() <= day_end {
        slots.push(OccupancyWindow::starting_at(current));
        current += event_duration();
    }
    slots
}

/// Computes free slots by probing the conflict detector slot by slot.
#[derive(Clone)]
pub struct AvailabilityPlanner {
    detector: ConflictDetector,
}

impl AvailabilityPlanner {
    pub fn new(detector: ConflictDetector) -> Self {
        Self { detector }
    }

    /// Start times of the grid slots on `day` that no event on the stage overlaps.
    pub fn free_slots(&self, stage_id: &str, day: NaiveDate) -> Result<Vec<NaiveDateTime>> {
        let mut free = Vec::new();
        for slot in slot_grid(day) {
            if !self.detector.has_conflict(stage_id, slot.start, slot.end)? {
                free.push(slot.start);
            }
        }
        Ok(free)
    }

    /// Whole-day view of one stage; available when at least one slot is free.
    pub fn for_day(&self, stage: &Stage, day: NaiveDate) -> Result<StageAvailability> {
        let slots = self.free_slots(&stage.id, day)?;
        Ok(StageAvailability {
            stage_id: stage.id.clone(),
            stage_name: stage.name.clone(),
            available: !slots.is_empty(),
            available_time_slots: slots,
        })
    }

    /// Availability for the window starting at `anchor`.
    ///
    /// The day's free slots are listed only when the anchor window itself is
    /// clear; a taken anchor yields an empty list.
    pub fn at_anchor(&self, stage: &Stage, anchor: NaiveDateTime) -> Result<StageAvailability> {
        let window = OccupancyWindow::starting_at(anchor);
        let available = !self.detector.has_conflict(&stage.id, window.start, window.end)?;
        let slots = if available {
            self.free_slots(&stage.id, anchor.date())?
        } else {
            Vec::new()
        };
        Ok(StageAvailability {
            stage_id: stage.id.clone(),
            stage_name: stage.name.clone(),
            available,
            available_time_slots: slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_seven_slots_from_nine_to_twenty_one() {
        let day = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        let starts: Vec<String> = slot_grid(day)
            .iter()
            .map(|slot| slot.start.format("%H:%M").to_string())
            .collect();
        assert_eq!(
            starts,
            vec!["09:00", "11:00", "13:00", "15:00", "17:00", "19:00", "21:00"]
        );
    }

    #[test]
    fn last_slot_ends_at_day_end() {
        let day = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        let last = *slot_grid(day).last().unwrap();
        assert_eq!(last.end, day.and_hms_opt(23, 0, 0).unwrap());
        assert!(slot_grid(day).iter().all(|slot| slot.start.date() == day));
    }
}
