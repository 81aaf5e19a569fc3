use super::events_model::{Event, EventStatistics};

/// Totals and per-day breakdowns of event count and declared capacity.
///
/// Days are the calendar date of each event's start time. Recomputed from
/// scratch on every call.
pub fn aggregate(events: &[Event]) -> EventStatistics {
    let mut stats = EventStatistics::default();
    for event in events {
        let day = event.start_time.date();
        let capacity = i64::from(event.capacity);

        stats.total_events += 1;
        stats.total_capacity += capacity;
        *stats.events_per_day.entry(day).or_insert(0) += 1;
        *stats.capacity_per_day.entry(day).or_insert(0) += capacity;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn event(day: u32, hour: u32, capacity: i32) -> Event {
        let start: NaiveDateTime = NaiveDate::from_ymd_opt(2026, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Event {
            id: format!("{day}-{hour}"),
            name: "Show".to_string(),
            start_time: start,
            stage_id: "main".to_string(),
            stage_name: "Main".to_string(),
            associated_artist: "Artist".to_string(),
            capacity,
            created_at: start,
        }
    }

    #[test]
    fn empty_store_yields_zeroes() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_events, 0);
        assert_eq!(stats.total_capacity, 0);
        assert!(stats.events_per_day.is_empty());
        assert!(stats.capacity_per_day.is_empty());
    }

    #[test]
    fn groups_by_start_date() {
        let events = vec![event(15, 10, 500), event(15, 22, 1500), event(16, 9, 300)];
        let stats = aggregate(&events);

        let july_15 = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        let july_16 = NaiveDate::from_ymd_opt(2026, 7, 16).unwrap();

        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.total_capacity, 2300);
        assert_eq!(stats.events_per_day[&july_15], 2);
        assert_eq!(stats.events_per_day[&july_16], 1);
        assert_eq!(stats.capacity_per_day[&july_15], 2000);
        assert_eq!(stats.capacity_per_day[&july_16], 300);
    }
}
