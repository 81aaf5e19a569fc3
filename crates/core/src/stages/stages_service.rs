use log::debug;
use std::sync::Arc;

use super::stages_model::{NewStage, Stage, StageUpdate};
use super::stages_traits::{StageRepositoryTrait, StageServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing stages.
pub struct StageService {
    repository: Arc<dyn StageRepositoryTrait>,
}

impl StageService {
    /// Creates a new StageService instance
    pub fn new(repository: Arc<dyn StageRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl StageServiceTrait for StageService {
    fn get_stages(&self) -> Result<Vec<Stage>> {
        self.repository.list()
    }

    fn get_stage(&self, stage_id: &str) -> Result<Stage> {
        self.repository
            .find_by_id(stage_id)?
            .ok_or_else(|| Error::StageNotFound(stage_id.to_string()))
    }

    async fn create_stage(&self, new_stage: NewStage) -> Result<Stage> {
        new_stage.validate()?;
        debug!("Creating stage '{}' at {}", new_stage.name, new_stage.location);
        self.repository.create(new_stage).await
    }

    async fn update_stage(&self, stage_id: &str, update: StageUpdate) -> Result<Stage> {
        update.validate()?;
        self.get_stage(stage_id)?;
        self.repository.update(stage_id, update).await
    }

    /// Deletes a stage; its events go with it.
    async fn delete_stage(&self, stage_id: &str) -> Result<()> {
        let deleted = self.repository.delete(stage_id).await?;
        if deleted == 0 {
            return Err(Error::StageNotFound(stage_id.to_string()));
        }
        debug!("Deleted stage {}", stage_id);
        Ok(())
    }

    fn search_stages_by_name(&self, fragment: &str) -> Result<Vec<Stage>> {
        self.repository.search_by_name(fragment)
    }

    fn get_stages_by_location(&self, location: &str) -> Result<Vec<Stage>> {
        self.repository.list_by_location(location)
    }

    fn get_stages_with_min_capacity(&self, min_capacity: i32) -> Result<Vec<Stage>> {
        let mut stages = self.repository.list_with_min_capacity(min_capacity)?;
        stages.sort_by(|a, b| b.max_capacity.cmp(&a.max_capacity));
        Ok(stages)
    }
}
