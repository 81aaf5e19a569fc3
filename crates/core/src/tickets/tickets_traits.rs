use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::tickets_model::EventWithTicketInfo;
use crate::errors::Result;

/// Client for the external ticket service.
///
/// Implementations are expected to time out on their own; the engine never
/// waits on this collaborator for scheduling decisions.
#[async_trait]
pub trait TicketServiceClientTrait: Send + Sync {
    /// Seats still on sale for the festival event named `event_name`.
    async fn available_seats(&self, event_name: &str) -> Result<Option<i64>>;

    /// Revenue per festival event name.
    async fn revenue_by_festival(&self) -> Result<HashMap<String, Decimal>>;
}

/// Trait for ticket enrichment operations.
#[async_trait]
pub trait TicketEnrichmentServiceTrait: Send + Sync {
    async fn get_event_with_ticket_info(
        &self,
        event_id: &str,
        region: &str,
    ) -> Result<EventWithTicketInfo>;

    /// Checks that `quantity` seats are still on sale and returns the
    /// enriched event.
    async fn reserve_tickets(
        &self,
        event_id: &str,
        quantity: i64,
        region: &str,
    ) -> Result<EventWithTicketInfo>;
}
