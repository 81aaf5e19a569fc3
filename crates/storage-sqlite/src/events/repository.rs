use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use festival_core::events::{
    conflicting_events, Event, EventRepositoryTrait, EventUpdate, NewEvent, OccupancyWindow,
};
use festival_core::{Error, Result};

use super::model::{EventDB, NewEventDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{events, stages};
use crate::utils::{contains_pattern, LIKE_ESCAPE};

type JoinedQuery<'a> = diesel::dsl::IntoBoxed<
    'a,
    diesel::dsl::InnerJoin<events::table, stages::table>,
    Sqlite,
>;

fn joined<'a>() -> JoinedQuery<'a> {
    events::table.inner_join(stages::table).into_boxed()
}

/// Runs a joined event query and attaches each event's stage name.
fn load_events(conn: &mut SqliteConnection, query: JoinedQuery<'_>) -> Result<Vec<Event>> {
    let rows = query
        .order((events::start_time.asc(), events::created_at.asc(), events::id.asc()))
        .select((EventDB::as_select(), stages::name))
        .load::<(EventDB, String)>(conn)
        .map_err(StorageError::from)?;
    Ok(rows
        .into_iter()
        .map(|(event_db, stage_name)| event_db.into_event(stage_name))
        .collect())
}

fn find_event(conn: &mut SqliteConnection, event_id: &str) -> Result<Option<Event>> {
    Ok(load_events(conn, joined().filter(events::id.eq(event_id.to_string())))?
        .into_iter()
        .next())
}

fn find_stage_name(conn: &mut SqliteConnection, stage_id: &str) -> Result<Option<String>> {
    Ok(stages::table
        .find(stage_id)
        .select(stages::name)
        .first::<String>(conn)
        .optional()
        .map_err(StorageError::from)?)
}

/// Events on `stage_id` whose start lies in `(window.start - 2h, window.end)`.
fn overlap_candidates(
    conn: &mut SqliteConnection,
    stage_id: &str,
    window: &OccupancyWindow,
) -> Result<Vec<Event>> {
    load_events(
        conn,
        joined()
            .filter(events::stage_id.eq(stage_id.to_string()))
            .filter(events::start_time.gt(window.earliest_overlapping_start()))
            .filter(events::start_time.lt(window.end)),
    )
}

/// Fails with `StageUnavailable` if `window` is taken on `stage_id`.
fn ensure_window_free(
    conn: &mut SqliteConnection,
    stage_id: &str,
    start_time: NaiveDateTime,
    exclude_event_id: Option<&str>,
) -> Result<()> {
    let window = OccupancyWindow::starting_at(start_time);
    let candidates = overlap_candidates(conn, stage_id, &window)?;
    let conflicts = conflicting_events(candidates, &window, exclude_event_id);
    if let Some(conflict) = conflicts.first() {
        debug!(
            "Rejecting write on stage {} at {}: overlaps event {}",
            stage_id, start_time, conflict.id
        );
        return Err(Error::StageUnavailable {
            stage_id: stage_id.to_string(),
            start_time,
        });
    }
    Ok(())
}

pub struct EventRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EventRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        EventRepository { pool, writer }
    }

    fn read(&self, query: JoinedQuery<'_>) -> Result<Vec<Event>> {
        let mut conn = get_connection(&self.pool)?;
        load_events(&mut conn, query)
    }
}

#[async_trait]
impl EventRepositoryTrait for EventRepository {
    async fn create(&self, new_event: NewEvent) -> Result<Event> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Event> {
                let stage_name = find_stage_name(conn, &new_event.stage_id)?
                    .ok_or_else(|| Error::StageNotFound(new_event.stage_id.clone()))?;
                ensure_window_free(conn, &new_event.stage_id, new_event.start_time, None)?;

                let new_event_db = NewEventDB::new(
                    Uuid::new_v4().to_string(),
                    new_event,
                    Utc::now().naive_utc(),
                );
                let result_db = diesel::insert_into(events::table)
                    .values(&new_event_db)
                    .returning(EventDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into_event(stage_name))
            })
            .await
    }

    async fn update(&self, event_id: &str, patch: EventUpdate) -> Result<Event> {
        let event_id = event_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Event> {
                let current = find_event(conn, &event_id)?
                    .ok_or_else(|| Error::EventNotFound(event_id.clone()))?;
                let patched = patch.apply(current.clone());
                if find_stage_name(conn, &patched.stage_id)?.is_none() {
                    return Err(Error::StageNotFound(patched.stage_id));
                }
                if patched.start_time != current.start_time || patched.stage_id != current.stage_id
                {
                    ensure_window_free(
                        conn,
                        &patched.stage_id,
                        patched.start_time,
                        Some(event_id.as_str()),
                    )?;
                }

                diesel::update(events::table.find(event_id.as_str()))
                    .set(&EventDB::from(patched))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                find_event(conn, &event_id)?.ok_or(Error::EventNotFound(event_id))
            })
            .await
    }

    async fn delete(&self, event_id: &str) -> Result<usize> {
        let event_id = event_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(events::table.find(event_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn find_by_id(&self, event_id: &str) -> Result<Option<Event>> {
        let mut conn = get_connection(&self.pool)?;
        find_event(&mut conn, event_id)
    }

    fn list(&self) -> Result<Vec<Event>> {
        self.read(joined())
    }

    fn list_by_stage(&self, stage_id: &str) -> Result<Vec<Event>> {
        self.read(joined().filter(events::stage_id.eq(stage_id.to_string())))
    }

    fn list_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> Result<Vec<Event>> {
        self.read(
            joined()
                .filter(events::start_time.ge(from))
                .filter(events::start_time.le(to)),
        )
    }

    fn search_by_name(&self, fragment: &str) -> Result<Vec<Event>> {
        self.read(
            joined().filter(
                events::name
                    .like(contains_pattern(fragment))
                    .escape(LIKE_ESCAPE),
            ),
        )
    }

    fn search_by_artist(&self, fragment: &str) -> Result<Vec<Event>> {
        self.read(
            joined().filter(
                events::associated_artist
                    .like(contains_pattern(fragment))
                    .escape(LIKE_ESCAPE),
            ),
        )
    }

    fn list_with_min_capacity(&self, min_capacity: i32) -> Result<Vec<Event>> {
        self.read(joined().filter(events::capacity.ge(min_capacity)))
    }

    fn find_overlap_candidates(
        &self,
        stage_id: &str,
        window: &OccupancyWindow,
    ) -> Result<Vec<Event>> {
        let mut conn = get_connection(&self.pool)?;
        overlap_candidates(&mut conn, stage_id, window)
    }
}
