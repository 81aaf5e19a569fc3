use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use festival_core::stages::{NewStage, Stage, StageRepositoryTrait, StageUpdate};
use festival_core::{Error, Result};

use super::model::{NewStageDB, StageDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::stages;
use crate::utils::{contains_pattern, LIKE_ESCAPE};

pub struct StageRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StageRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        StageRepository { pool, writer }
    }

    fn load(&self, query: stages::BoxedQuery<'_, diesel::sqlite::Sqlite>) -> Result<Vec<Stage>> {
        let mut conn = get_connection(&self.pool)?;
        let stages_db = query
            .select(StageDB::as_select())
            .load::<StageDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(stages_db.into_iter().map(Stage::from).collect())
    }
}

#[async_trait]
impl StageRepositoryTrait for StageRepository {
    async fn create(&self, new_stage: NewStage) -> Result<Stage> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Stage> {
                let mut new_stage_db: NewStageDB = new_stage.into();
                new_stage_db.id = Some(Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(stages::table)
                    .values(&new_stage_db)
                    .returning(StageDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Stage::from(result_db))
            })
            .await
    }

    async fn update(&self, stage_id: &str, update: StageUpdate) -> Result<Stage> {
        let stage_db = StageDB::from_update(stage_id.to_string(), update);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Stage> {
                let affected = diesel::update(stages::table.find(stage_db.id.as_str()))
                    .set(&stage_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::StageNotFound(stage_db.id));
                }
                Ok(Stage::from(stage_db))
            })
            .await
    }

    async fn delete(&self, stage_id: &str) -> Result<usize> {
        let stage_id = stage_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Events go with their stage through ON DELETE CASCADE.
                Ok(diesel::delete(stages::table.find(stage_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn find_by_id(&self, stage_id: &str) -> Result<Option<Stage>> {
        let mut conn = get_connection(&self.pool)?;
        let stage_db = stages::table
            .find(stage_id)
            .select(StageDB::as_select())
            .first::<StageDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(stage_db.map(Stage::from))
    }

    fn list(&self) -> Result<Vec<Stage>> {
        self.load(stages::table.order(stages::name.asc()).into_boxed())
    }

    fn search_by_name(&self, fragment: &str) -> Result<Vec<Stage>> {
        // SQLite LIKE is case-insensitive for ASCII.
        self.load(
            stages::table
                .filter(
                    stages::name
                        .like(contains_pattern(fragment))
                        .escape(LIKE_ESCAPE),
                )
                .order(stages::name.asc())
                .into_boxed(),
        )
    }

    fn list_by_location(&self, location: &str) -> Result<Vec<Stage>> {
        self.load(
            stages::table
                .filter(stages::location.eq(location.to_string()))
                .order(stages::name.asc())
                .into_boxed(),
        )
    }

    fn list_with_min_capacity(&self, min_capacity: i32) -> Result<Vec<Stage>> {
        self.load(
            stages::table
                .filter(stages::max_capacity.ge(min_capacity))
                .order(stages::max_capacity.desc())
                .into_boxed(),
        )
    }
}
