use chrono::Duration;

/// Every event holds its stage for this many hours, whatever its declared
/// capacity or type.
pub const EVENT_DURATION_HOURS: i64 = 2;

/// First bookable hour of the planning day.
pub const PLANNING_DAY_START_HOUR: u32 = 9;

/// No slot may run past this hour.
pub const PLANNING_DAY_END_HOUR: u32 = 23;

/// Length of an event's occupancy window.
pub fn event_duration() -> Duration {
    Duration::hours(EVENT_DURATION_HOURS)
}
