use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use festival_core::events::{Event, StageAvailability};
use festival_core::stages::{NewStage, Stage, StageUpdate};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

use super::extract::{ApiJson, ApiQuery};

#[derive(Deserialize)]
struct NameQuery {
    name: String,
}

#[derive(Deserialize)]
struct LocationQuery {
    location: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CapacityQuery {
    min_capacity: i32,
}

#[derive(Deserialize)]
struct DayQuery {
    day: NaiveDate,
}

async fn list_stages(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Stage>>> {
    Ok(Json(state.stage_service.get_stages()?))
}

async fn get_stage(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Stage>> {
    Ok(Json(state.stage_service.get_stage(&id)?))
}

async fn create_stage(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewStage>,
) -> ApiResult<(StatusCode, Json<Stage>)> {
    let created = state.stage_service.create_stage(payload).await?;
    tracing::info!("Created stage {} ({})", created.id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_stage(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<StageUpdate>,
) -> ApiResult<Json<Stage>> {
    Ok(Json(state.stage_service.update_stage(&id, payload).await?))
}

async fn delete_stage(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.stage_service.delete_stage(&id).await?;
    tracing::info!("Deleted stage {} and its events", id);
    Ok(StatusCode::NO_CONTENT)
}

async fn search_stages(
    ApiQuery(query): ApiQuery<NameQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Stage>>> {
    Ok(Json(state.stage_service.search_stages_by_name(&query.name)?))
}

async fn stages_by_location(
    ApiQuery(query): ApiQuery<LocationQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Stage>>> {
    Ok(Json(
        state.stage_service.get_stages_by_location(&query.location)?,
    ))
}

async fn stages_by_capacity(
    ApiQuery(query): ApiQuery<CapacityQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Stage>>> {
    Ok(Json(
        state
            .stage_service
            .get_stages_with_min_capacity(query.min_capacity)?,
    ))
}

async fn stage_schedule(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.event_service.stage_schedule(&id)?))
}

async fn stage_availability(
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<DayQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StageAvailability>> {
    Ok(Json(
        state
            .event_service
            .stage_availability_for_day(&id, query.day)?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stages", get(list_stages).post(create_stage))
        .route("/stages/search", get(search_stages))
        .route("/stages/filter/location", get(stages_by_location))
        .route("/stages/filter/capacity", get(stages_by_capacity))
        .route(
            "/stages/{id}",
            get(get_stage).put(update_stage).delete(delete_stage),
        )
        .route("/stages/{id}/schedule", get(stage_schedule))
        .route("/stages/{id}/availability", get(stage_availability))
}
