//! Stages module - domain models, services, and traits.

mod stages_model;
mod stages_service;
mod stages_traits;

// Re-export the public interface
pub use stages_model::{NewStage, Stage, StageUpdate};
pub use stages_service::StageService;
pub use stages_traits::{StageRepositoryTrait, StageServiceTrait};
