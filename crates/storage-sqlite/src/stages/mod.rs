//! SQLite storage implementation for stages.

mod model;
mod repository;

pub use model::{NewStageDB, StageDB};
pub use repository::StageRepository;
