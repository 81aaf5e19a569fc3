use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub ticket_service_url: String,
    pub ticket_service_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("FM_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid FM_LISTEN_ADDR")?;
        let db_path = std::env::var("FM_DB_PATH").unwrap_or_else(|_| "./db/festival.db".into());
        let cors_allow = std::env::var("FM_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = millis_from_env("FM_REQUEST_TIMEOUT_MS", 30_000);
        let ticket_service_url = std::env::var("FM_TICKET_SERVICE_URL")
            .unwrap_or_else(|_| festival_connect::DEFAULT_TICKET_SERVICE_URL.into());
        let ticket_timeout_ms = millis_from_env("FM_TICKET_SERVICE_TIMEOUT_MS", 5_000);
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            ticket_service_url,
            ticket_service_timeout: Duration::from_millis(ticket_timeout_ms),
        })
    }
}

fn millis_from_env(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
