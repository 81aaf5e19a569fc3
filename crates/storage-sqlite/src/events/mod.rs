//! SQLite storage implementation for events.

mod model;
mod repository;

pub use model::{EventDB, NewEventDB};
pub use repository::EventRepository;
