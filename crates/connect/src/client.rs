//! HTTP client for the ticket service API.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use festival_core::constants::GATEWAY_CALLER_ID;
use festival_core::errors::{Error, Result};
use festival_core::tickets::TicketServiceClientTrait;

/// Default base URL for the ticket service.
pub const DEFAULT_TICKET_SERVICE_URL: &str = "http://localhost:8083";

const REQUESTED_WITH: &str = "x-requested-with";

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the ticket service.
///
/// Requests identify themselves as coming from the gateway, which the ticket
/// service requires.
///
/// # Example
///
/// ```ignore
/// let client = TicketServiceClient::new("http://localhost:8083", Duration::from_secs(5))?;
/// let seats = client.available_seats("Opening Night").await?;
/// ```
#[derive(Debug, Clone)]
pub struct TicketServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl TicketServiceClient {
    /// Create a new ticket service client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::External(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(REQUESTED_WITH, HeaderValue::from_static(GATEWAY_CALLER_ID));
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/tickets{}", self.base_url, path)
    }

    /// Make a GET request and parse the response.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.url(path);
        debug!("[TicketService] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| Error::External(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::External(format!("Failed to read response: {}", e)))?;

        parse_body(status, &body)
    }
}

/// Decodes a ticket service response body.
///
/// An empty or `null` body on success means the service has no value.
fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<Option<T>> {
    if !status.is_success() {
        if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
            if let Some(msg) = err.message.or(err.error) {
                return Err(Error::External(format!("Ticket service error: {}", msg)));
            }
        }
        return Err(Error::External(format!(
            "Ticket service error {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        )));
    }

    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<T>>(body)
        .map_err(|e| Error::External(format!("Failed to parse response: {} - {}", e, body)))
}

#[async_trait]
impl TicketServiceClientTrait for TicketServiceClient {
    async fn available_seats(&self, event_name: &str) -> Result<Option<i64>> {
        let path = format!(
            "/festival/{}/available-seats",
            urlencoding::encode(event_name)
        );
        self.get(&path).await
    }

    async fn revenue_by_festival(&self) -> Result<HashMap<String, Decimal>> {
        Ok(self
            .get::<HashMap<String, Decimal>>("/revenue/by-festival")
            .await?
            .unwrap_or_default())
    }
}
