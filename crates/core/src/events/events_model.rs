//! Event domain models.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::events_constants::event_duration;
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a scheduled event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub start_time: NaiveDateTime,
    pub stage_id: String,
    pub stage_name: String,
    pub associated_artist: String,
    pub capacity: i32,
    pub created_at: NaiveDateTime,
}

impl Event {
    /// The half-open interval during which this event holds its stage.
    pub fn occupancy(&self) -> OccupancyWindow {
        OccupancyWindow::starting_at(self.start_time)
    }
}

/// Input model for creating a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    pub start_time: NaiveDateTime,
    pub stage_id: String,
    pub associated_artist: String,
    pub capacity: i32,
}

impl NewEvent {
    /// Validates the new event data.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_artist(&self.associated_artist)?;
        validate_capacity(self.capacity)?;
        validate_start(self.start_time)?;
        if self.stage_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "stageId".to_string(),
            )));
        }
        Ok(())
    }
}

/// Partial update for an event. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub name: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub stage_id: Option<String>,
    pub associated_artist: Option<String>,
    pub capacity: Option<i32>,
}

impl EventUpdate {
    /// Writes the present fields onto `event`, leaving the rest untouched.
    ///
    /// The start time is normalized; `stage_name` is not touched and must be
    /// re-read when the stage changes.
    pub fn apply(&self, mut event: Event) -> Event {
        if let Some(name) = &self.name {
            event.name = name.clone();
        }
        if let Some(start_time) = self.start_time {
            event.start_time = normalize_start(start_time);
        }
        if let Some(stage_id) = &self.stage_id {
            event.stage_id = stage_id.clone();
        }
        if let Some(artist) = &self.associated_artist {
            event.associated_artist = artist.clone();
        }
        if let Some(capacity) = self.capacity {
            event.capacity = capacity;
        }
        event
    }

    /// Validates the fields that are present.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(artist) = &self.associated_artist {
            validate_artist(artist)?;
        }
        if let Some(capacity) = self.capacity {
            validate_capacity(capacity)?;
        }
        if let Some(start_time) = self.start_time {
            validate_start(start_time)?;
        }
        if matches!(&self.stage_id, Some(stage_id) if stage_id.trim().is_empty()) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Stage id cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Rejects start times too close to the calendar's limits to hold a full
/// window and its overlap look-back.
pub fn validate_start(start_time: NaiveDateTime) -> Result<()> {
    let duration = event_duration();
    if start_time.checked_add_signed(duration).is_none()
        || start_time.checked_sub_signed(duration).is_none()
    {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Start time {} is out of range",
            start_time
        ))));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Event name cannot be empty".to_string(),
        )));
    }
    Ok(())
}

fn validate_artist(artist: &str) -> Result<()> {
    if artist.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Associated artist cannot be empty".to_string(),
        )));
    }
    Ok(())
}

fn validate_capacity(capacity: i32) -> Result<()> {
    if capacity <= 0 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Event capacity must be positive".to_string(),
        )));
    }
    Ok(())
}

/// Drops sub-second precision so stored start times compare exactly.
pub fn normalize_start(start: NaiveDateTime) -> NaiveDateTime {
    start.with_nanosecond(0).unwrap_or(start)
}

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl OccupancyWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The window an event starting at `start` occupies.
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start
                .checked_add_signed(event_duration())
                .unwrap_or(NaiveDateTime::MAX),
        }
    }

    /// `[s1,e1)` and `[s2,e2)` overlap iff `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, other: &OccupancyWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Events starting strictly after this instant (and before `end`) are the
    /// only ones whose occupancy can reach into the window.
    pub fn earliest_overlapping_start(&self) -> NaiveDateTime {
        self.start
            .checked_sub_signed(event_duration())
            .unwrap_or(NaiveDateTime::MIN)
    }
}

/// Availability of one stage, either for an anchor window or a whole day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StageAvailability {
    pub stage_id: String,
    pub stage_name: String,
    pub available: bool,
    pub available_time_slots: Vec<NaiveDateTime>,
}

/// Totals and per-day breakdowns over every stored event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventStatistics {
    pub total_events: i64,
    pub total_capacity: i64,
    pub events_per_day: BTreeMap<NaiveDate, i64>,
    pub capacity_per_day: BTreeMap<NaiveDate, i64>,
}

/// Requested ordering for sorted listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl From<&str> for SortOrder {
    /// Only a case-insensitive `"desc"` selects descending order.
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
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

    #[test]
    fn occupancy_is_two_hours() {
        let window = OccupancyWindow::starting_at(at(20, 0));
        assert_eq!(window.end, at(22, 0));
    }

    #[test]
    fn adjacent_windows_do_not_overlap() {
        let existing = OccupancyWindow::starting_at(at(20, 0));
        let next = OccupancyWindow::starting_at(at(22, 0));
        assert!(!existing.overlaps(&next));
        assert!(!next.overlaps(&existing));
    }

    #[test]
    fn window_starting_inside_existing_overlaps() {
        let existing = OccupancyWindow::starting_at(at(20, 0));
        let candidate = OccupancyWindow::starting_at(at(20, 30));
        assert!(existing.overlaps(&candidate));
        assert!(candidate.overlaps(&existing));
    }

    #[test]
    fn event_started_before_window_still_occupying_overlaps() {
        let existing = OccupancyWindow::starting_at(at(13, 0));
        let candidate = OccupancyWindow::new(at(14, 0), at(14, 30));
        assert!(candidate.overlaps(&existing));
    }

    #[test]
    fn normalize_start_truncates_subseconds() {
        let start = at(20, 0).with_nanosecond(450_000_000).unwrap();
        assert_eq!(normalize_start(start), at(20, 0));
    }

    #[test]
    fn sort_order_parses_leniently() {
        assert_eq!(SortOrder::from("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::from("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::from("sideways"), SortOrder::Asc);
    }

    #[test]
    fn update_validates_only_present_fields() {
        let patch = EventUpdate {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let patch = EventUpdate {
            capacity: Some(-5),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(Error::Validation(_))));
    }

    fn sample_event() -> Event {
        Event {
            id: "e1".to_string(),
            name: "Opening".to_string(),
            start_time: at(10, 0),
            stage_id: "main".to_string(),
            stage_name: "Main".to_string(),
            associated_artist: "The Band".to_string(),
            capacity: 500,
            created_at: at(0, 0),
        }
    }

    #[test]
    fn apply_touches_only_present_fields() {
        let current = sample_event();
        let patch = EventUpdate {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let patched = patch.apply(current.clone());
        assert_eq!(patched.name, "Renamed");
        assert_eq!(patched.start_time, current.start_time);
        assert_eq!(patched.stage_id, current.stage_id);
        assert_eq!(patched.capacity, current.capacity);

        let patch = EventUpdate {
            start_time: Some(at(14, 0).with_nanosecond(250_000_000).unwrap()),
            ..Default::default()
        };
        assert_eq!(patch.apply(current).start_time, at(14, 0));
    }

    #[test]
    fn start_times_at_calendar_limits_are_rejected() {
        let near_max = NaiveDateTime::MAX - chrono::Duration::minutes(30);
        let near_min = NaiveDateTime::MIN + chrono::Duration::minutes(30);

        let mut draft = NewEvent {
            name: "Far Future".to_string(),
            start_time: near_max,
            stage_id: "main".to_string(),
            associated_artist: "Nobody".to_string(),
            capacity: 10,
        };
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
        draft.start_time = near_min;
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));

        let patch = EventUpdate {
            start_time: Some(near_max),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(Error::Validation(_))));

        assert!(validate_start(at(20, 0)).is_ok());
    }

    #[test]
    fn windows_saturate_instead_of_overflowing() {
        let near_max = NaiveDateTime::MAX - chrono::Duration::minutes(30);
        assert_eq!(OccupancyWindow::starting_at(near_max).end, NaiveDateTime::MAX);

        let near_min = NaiveDateTime::MIN + chrono::Duration::minutes(30);
        assert_eq!(
            OccupancyWindow::starting_at(near_min).earliest_overlapping_start(),
            NaiveDateTime::MIN
        );
    }
}
