//! Stage repository and service traits.

use async_trait::async_trait;

use super::stages_model::{NewStage, Stage, StageUpdate};
use crate::errors::Result;

/// Trait defining the contract for Stage repository operations.
///
/// Deleting a stage must also remove every event scheduled on it.
#[async_trait]
pub trait StageRepositoryTrait: Send + Sync {
    /// Creates a new stage. Stage names are unique.
    async fn create(&self, new_stage: NewStage) -> Result<Stage>;

    /// Replaces the attributes of an existing stage.
    async fn update(&self, stage_id: &str, update: StageUpdate) -> Result<Stage>;

    /// Deletes a stage by its ID, returning the number of deleted records.
    async fn delete(&self, stage_id: &str) -> Result<usize>;

    /// Retrieves a stage by its ID.
    fn find_by_id(&self, stage_id: &str) -> Result<Option<Stage>>;

    /// Lists every stage ordered by name.
    fn list(&self) -> Result<Vec<Stage>>;

    /// Stages whose name contains `fragment`, case-insensitively.
    fn search_by_name(&self, fragment: &str) -> Result<Vec<Stage>>;

    /// Stages at exactly `location`.
    fn list_by_location(&self, location: &str) -> Result<Vec<Stage>>;

    /// Stages with `max_capacity >= min_capacity`.
    fn list_with_min_capacity(&self, min_capacity: i32) -> Result<Vec<Stage>>;
}

/// Trait defining the contract for Stage service operations.
#[async_trait]
pub trait StageServiceTrait: Send + Sync {
    fn get_stages(&self) -> Result<Vec<Stage>>;
    fn get_stage(&self, stage_id: &str) -> Result<Stage>;
    async fn create_stage(&self, new_stage: NewStage) -> Result<Stage>;
    async fn update_stage(&self, stage_id: &str, update: StageUpdate) -> Result<Stage>;
    async fn delete_stage(&self, stage_id: &str) -> Result<()>;
    fn search_stages_by_name(&self, fragment: &str) -> Result<Vec<Stage>>;
    fn get_stages_by_location(&self, location: &str) -> Result<Vec<Stage>>;

    /// Stages that can hold at least `min_capacity`, largest first.
    fn get_stages_with_min_capacity(&self, min_capacity: i32) -> Result<Vec<Stage>>;
}
