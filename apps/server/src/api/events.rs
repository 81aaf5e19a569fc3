use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use festival_core::constants::DEFAULT_REGION;
use festival_core::events::{
    Event, EventStatistics, EventUpdate, NewEvent, SortOrder, StageAvailability,
};
use festival_core::tickets::EventWithTicketInfo;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

use super::extract::{ApiJson, ApiQuery};

const REGION_HEADER: &str = "x-region";

#[derive(Deserialize)]
struct NameQuery {
    name: String,
}

#[derive(Deserialize)]
struct ArtistQuery {
    artist: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StageQuery {
    stage_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateRangeQuery {
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
}

#[derive(Deserialize)]
struct SpecificDateQuery {
    date: NaiveDate,
}

#[derive(Deserialize)]
struct AnchorQuery {
    date: NaiveDateTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CapacityQuery {
    min_capacity: i32,
}

#[derive(Deserialize)]
struct OrderQuery {
    #[serde(default)]
    order: Option<String>,
}

impl OrderQuery {
    fn sort_order(&self) -> SortOrder {
        self.order.as_deref().map(SortOrder::from).unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct ReserveRequest {
    quantity: i64,
}

fn region(headers: &HeaderMap) -> String {
    headers
        .get(REGION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_REGION)
        .to_string()
}

async fn list_events(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.event_service.get_events()?))
}

async fn get_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Event>> {
    Ok(Json(state.event_service.get_event(&id)?))
}

async fn create_event(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewEvent>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let created = state.event_service.create_event(payload).await?;
    tracing::info!(
        "Scheduled event {} on stage {} at {}",
        created.id,
        created.stage_id,
        created.start_time
    );
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<EventUpdate>,
) -> ApiResult<Json<Event>> {
    Ok(Json(state.event_service.update_event(&id, payload).await?))
}

async fn delete_event(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.event_service.delete_event(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_events(
    ApiQuery(query): ApiQuery<NameQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.event_service.search_events_by_name(&query.name)?))
}

async fn events_by_artist(
    ApiQuery(query): ApiQuery<ArtistQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.event_service.get_events_by_artist(&query.artist)?))
}

async fn events_by_stage(
    ApiQuery(query): ApiQuery<StageQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.event_service.get_events_by_stage(&query.stage_id)?))
}

async fn events_between(
    ApiQuery(query): ApiQuery<DateRangeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(
        state
            .event_service
            .get_events_between(query.start_date, query.end_date)?,
    ))
}

async fn events_on(
    ApiQuery(query): ApiQuery<SpecificDateQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.event_service.get_events_on(query.date)?))
}

async fn events_by_capacity(
    ApiQuery(query): ApiQuery<CapacityQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(
        state
            .event_service
            .get_events_with_min_capacity(query.min_capacity)?,
    ))
}

async fn events_sorted_by_date(
    ApiQuery(query): ApiQuery<OrderQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(
        state
            .event_service
            .get_events_sorted_by_date(query.sort_order())?,
    ))
}

async fn events_sorted_by_capacity(
    ApiQuery(query): ApiQuery<OrderQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(
        state
            .event_service
            .get_events_sorted_by_capacity(query.sort_order())?,
    ))
}

async fn check_stage_availability(
    ApiQuery(query): ApiQuery<AnchorQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<StageAvailability>>> {
    Ok(Json(
        state.event_service.check_stage_availability(query.date)?,
    ))
}

async fn statistics(State(state): State<Arc<AppState>>) -> ApiResult<Json<EventStatistics>> {
    Ok(Json(state.event_service.statistics()?))
}

async fn event_tickets(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EventWithTicketInfo>> {
    let info = state
        .ticket_service
        .get_event_with_ticket_info(&id, &region(&headers))
        .await?;
    Ok(Json(info))
}

async fn reserve_tickets(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ReserveRequest>,
) -> ApiResult<Json<EventWithTicketInfo>> {
    let info = state
        .ticket_service
        .reserve_tickets(&id, payload.quantity, &region(&headers))
        .await?;
    Ok(Json(info))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/search", get(search_events))
        .route("/events/filter/artist", get(events_by_artist))
        .route("/events/filter/stage", get(events_by_stage))
        .route("/events/filter/date", get(events_between))
        .route("/events/filter/date/specific", get(events_on))
        .route("/events/filter/capacity", get(events_by_capacity))
        .route("/events/sort/date", get(events_sorted_by_date))
        .route("/events/sort/capacity", get(events_sorted_by_capacity))
        .route("/events/availability/stage", get(check_stage_availability))
        .route("/events/statistics", get(statistics))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/{id}/tickets", get(event_tickets))
        .route("/events/{id}/reserve", post(reserve_tickets))
}
