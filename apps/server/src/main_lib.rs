use std::sync::Arc;

use crate::config::Config;
use festival_connect::TicketServiceClient;
use festival_core::{
    events::{EventService, EventServiceTrait},
    stages::{StageService, StageServiceTrait},
    tickets::{TicketEnrichmentService, TicketEnrichmentServiceTrait},
};
use festival_storage_sqlite::{
    db::{self, write_actor},
    events::EventRepository,
    stages::StageRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub stage_service: Arc<dyn StageServiceTrait + Send + Sync>,
    pub event_service: Arc<dyn EventServiceTrait + Send + Sync>,
    pub ticket_service: Arc<dyn TicketEnrichmentServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let stage_repo = Arc::new(StageRepository::new(pool.clone(), writer.clone()));
    let event_repo = Arc::new(EventRepository::new(pool.clone(), writer));

    let stage_service = Arc::new(StageService::new(stage_repo.clone()));
    let event_service: Arc<dyn EventServiceTrait + Send + Sync> =
        Arc::new(EventService::new(event_repo, stage_repo));

    let ticket_client = Arc::new(TicketServiceClient::new(
        &config.ticket_service_url,
        config.ticket_service_timeout,
    )?);
    tracing::info!("Ticket service at {}", config.ticket_service_url);
    let ticket_service = Arc::new(TicketEnrichmentService::new(
        event_service.clone(),
        ticket_client,
    ));

    Ok(Arc::new(AppState {
        stage_service,
        event_service,
        ticket_service,
    }))
}
