//! Events module - scheduling engine, domain models, services, and traits.

pub mod availability;
pub mod conflict;
mod events_constants;
mod events_model;
mod events_service;
mod events_traits;
pub mod statistics;


// Re-export the public interface
pub use availability::{slot_grid, AvailabilityPlanner};
pub use conflict::{conflicting_events, ConflictDetector};
pub use events_constants::*;
pub use events_model::{
    normalize_start, validate_start, Event, EventStatistics, EventUpdate, NewEvent,
    OccupancyWindow, SortOrder, StageAvailability,
};
pub use events_service::{sort_by_start, EventService};
pub use events_traits::{EventRepositoryTrait, EventServiceTrait};
