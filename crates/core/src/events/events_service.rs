use log::debug;
use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::availability::AvailabilityPlanner;
use super::conflict::ConflictDetector;
use super::events_model::{
    normalize_start, validate_start, Event, EventStatistics, EventUpdate, NewEvent,
    OccupancyWindow, SortOrder, StageAvailability,
};
use super::events_traits::{EventRepositoryTrait, EventServiceTrait};
use super::statistics;
use crate::errors::{Error, Result};
use crate::stages::{Stage, StageRepositoryTrait};

/// Orders events by start time, then creation time, then id.
pub fn sort_by_start(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Service for scheduling events on stages.
pub struct EventService {
    event_repository: Arc<dyn EventRepositoryTrait>,
    stage_repository: Arc<dyn StageRepositoryTrait>,
    conflict_detector: ConflictDetector,
    planner: AvailabilityPlanner,
}

impl EventService {
    /// Creates a new EventService instance
    pub fn new(
        event_repository: Arc<dyn EventRepositoryTrait>,
        stage_repository: Arc<dyn StageRepositoryTrait>,
    ) -> Self {
        let conflict_detector = ConflictDetector::new(event_repository.clone());
        let planner = AvailabilityPlanner::new(conflict_detector.clone());
        Self {
            event_repository,
            stage_repository,
            conflict_detector,
            planner,
        }
    }

    fn require_stage(&self, stage_id: &str) -> Result<Stage> {
        self.stage_repository
            .find_by_id(stage_id)?
            .ok_or_else(|| Error::StageNotFound(stage_id.to_string()))
    }

    fn ensure_window_free(
        &self,
        stage_id: &str,
        start_time: NaiveDateTime,
        exclude_event_id: Option<&str>,
    ) -> Result<()> {
        let window = OccupancyWindow::starting_at(start_time);
        let conflicts = self
            .conflict_detector
            .find_conflicts(stage_id, &window, exclude_event_id)?;
        if !conflicts.is_empty() {
            debug!(
                "Stage {} rejected window starting {}: {} overlapping event(s)",
                stage_id,
                start_time,
                conflicts.len()
            );
            return Err(Error::StageUnavailable {
                stage_id: stage_id.to_string(),
                start_time,
            });
        }
        Ok(())
    }

    fn sorted_by_start(mut events: Vec<Event>) -> Vec<Event> {
        sort_by_start(&mut events);
        events
    }
}

#[async_trait::async_trait]
impl EventServiceTrait for EventService {
    async fn create_event(&self, mut new_event: NewEvent) -> Result<Event> {
        new_event.validate()?;
        new_event.start_time = normalize_start(new_event.start_time);

        let stage = self.require_stage(&new_event.stage_id)?;
        self.ensure_window_free(&stage.id, new_event.start_time, None)?;

        debug!(
            "Scheduling event '{}' on stage {} at {}",
            new_event.name, stage.id, new_event.start_time
        );
        self.event_repository.create(new_event).await
    }

    async fn update_event(&self, event_id: &str, patch: EventUpdate) -> Result<Event> {
        let current = self.get_event(event_id)?;
        patch.validate()?;

        let patched = patch.apply(current.clone());
        let stage = self.require_stage(&patched.stage_id)?;
        if patched.start_time != current.start_time || patched.stage_id != current.stage_id {
            self.ensure_window_free(&stage.id, patched.start_time, Some(event_id))?;
        }

        self.event_repository.update(event_id, patch).await
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        let deleted = self.event_repository.delete(event_id).await?;
        if deleted == 0 {
            return Err(Error::EventNotFound(event_id.to_string()));
        }
        debug!("Deleted event {}", event_id);
        Ok(())
    }

    fn get_event(&self, event_id: &str) -> Result<Event> {
        self.event_repository
            .find_by_id(event_id)?
            .ok_or_else(|| Error::EventNotFound(event_id.to_string()))
    }

    fn get_events(&self) -> Result<Vec<Event>> {
        Ok(Self::sorted_by_start(self.event_repository.list()?))
    }

    fn search_events_by_name(&self, fragment: &str) -> Result<Vec<Event>> {
        Ok(Self::sorted_by_start(
            self.event_repository.search_by_name(fragment)?,
        ))
    }

    fn get_events_by_artist(&self, fragment: &str) -> Result<Vec<Event>> {
        Ok(Self::sorted_by_start(
            self.event_repository.search_by_artist(fragment)?,
        ))
    }

    fn get_events_by_stage(&self, stage_id: &str) -> Result<Vec<Event>> {
        Ok(Self::sorted_by_start(
            self.event_repository.list_by_stage(stage_id)?,
        ))
    }

    fn get_events_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> Result<Vec<Event>> {
        Ok(Self::sorted_by_start(
            self.event_repository.list_between(from, to)?,
        ))
    }

    fn get_events_on(&self, day: NaiveDate) -> Result<Vec<Event>> {
        let from = day.and_time(NaiveTime::MIN);
        let to = match day.succ_opt() {
            Some(next) => next.and_time(NaiveTime::MIN) - chrono::Duration::seconds(1),
            None => day.and_time(NaiveTime::MIN),
        };
        let events = self.event_repository.list_between(from, to)?;
        Ok(Self::sorted_by_start(
            events
                .into_iter()
                .filter(|event| event.start_time.date() == day)
                .collect(),
        ))
    }

    fn get_events_with_min_capacity(&self, min_capacity: i32) -> Result<Vec<Event>> {
        let mut events = self.event_repository.list_with_min_capacity(min_capacity)?;
        events.sort_by_key(|event| Reverse(event.capacity));
        Ok(events)
    }

    fn get_events_sorted_by_date(&self, order: SortOrder) -> Result<Vec<Event>> {
        let mut events = self.get_events()?;
        if order == SortOrder::Desc {
            events.reverse();
        }
        Ok(events)
    }

    fn get_events_sorted_by_capacity(&self, order: SortOrder) -> Result<Vec<Event>> {
        let mut events = self.get_events()?;
        match order {
            SortOrder::Asc => events.sort_by_key(|event| event.capacity),
            SortOrder::Desc => events.sort_by_key(|event| Reverse(event.capacity)),
        }
        Ok(events)
    }

    fn check_stage_availability(&self, anchor: NaiveDateTime) -> Result<Vec<StageAvailability>> {
        validate_start(anchor)?;
        let anchor = normalize_start(anchor);
        self.stage_repository
            .list()?
            .iter()
            .map(|stage| self.planner.at_anchor(stage, anchor))
            .collect()
    }

    fn stage_availability_for_day(
        &self,
        stage_id: &str,
        day: NaiveDate,
    ) -> Result<StageAvailability> {
        let stage = self.require_stage(stage_id)?;
        self.planner.for_day(&stage, day)
    }

    fn stage_schedule(&self, stage_id: &str) -> Result<Vec<Event>> {
        Ok(Self::sorted_by_start(
            self.event_repository.list_by_stage(stage_id)?,
        ))
    }

    fn statistics(&self) -> Result<EventStatistics> {
        let events = self.event_repository.list()?;
        Ok(statistics::aggregate(&events))
    }
}
