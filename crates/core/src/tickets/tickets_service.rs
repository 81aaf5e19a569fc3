use log::warn;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::tickets_model::{EventWithTicketInfo, PricingRegion, TicketStatus};
use super::tickets_traits::{TicketEnrichmentServiceTrait, TicketServiceClientTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{Event, EventServiceTrait};

/// Joins scheduled events with the ticket service's sales data.
pub struct TicketEnrichmentService {
    event_service: Arc<dyn EventServiceTrait>,
    ticket_client: Arc<dyn TicketServiceClientTrait>,
}

impl TicketEnrichmentService {
    pub fn new(
        event_service: Arc<dyn EventServiceTrait>,
        ticket_client: Arc<dyn TicketServiceClientTrait>,
    ) -> Self {
        Self {
            event_service,
            ticket_client,
        }
    }

    async fn fetch_sales(&self, event_name: &str) -> Result<(Option<i64>, Decimal)> {
        let seats = self.ticket_client.available_seats(event_name).await?;
        let revenue = self
            .ticket_client
            .revenue_by_festival()
            .await?
            .get(event_name)
            .copied()
            .unwrap_or(Decimal::ZERO);
        Ok((seats, revenue))
    }

    fn enrich(
        event: Event,
        seats: Option<i64>,
        revenue: Decimal,
        status: TicketStatus,
        region: &str,
    ) -> EventWithTicketInfo {
        let message = PricingRegion::from_code(region).revenue_message(&event.name, revenue);
        EventWithTicketInfo {
            event,
            available_seats: seats.unwrap_or(0),
            total_revenue: revenue,
            ticket_status: status,
            message,
        }
    }
}

#[async_trait::async_trait]
impl TicketEnrichmentServiceTrait for TicketEnrichmentService {
    /// Falls back to an `Unknown` status when the ticket service is down.
    async fn get_event_with_ticket_info(
        &self,
        event_id: &str,
        region: &str,
    ) -> Result<EventWithTicketInfo> {
        let event = self.event_service.get_event(event_id)?;
        match self.fetch_sales(&event.name).await {
            Ok((seats, revenue)) => {
                let status = TicketStatus::from_seats(seats, event.capacity);
                Ok(Self::enrich(event, seats, revenue, status, region))
            }
            Err(err) => {
                warn!(
                    "Ticket service unavailable for event {}: {}",
                    event.id, err
                );
                Ok(Self::enrich(
                    event,
                    None,
                    Decimal::ZERO,
                    TicketStatus::Unknown,
                    region,
                ))
            }
        }
    }

    async fn reserve_tickets(
        &self,
        event_id: &str,
        quantity: i64,
        region: &str,
    ) -> Result<EventWithTicketInfo> {
        if quantity <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Ticket quantity must be positive".to_string(),
            )));
        }
        let event = self.event_service.get_event(event_id)?;
        let (seats, revenue) = self
            .fetch_sales(&event.name)
            .await
            .map_err(|err| Error::External(err.to_string()))?;

        let available = seats.unwrap_or(0);
        if available < quantity {
            return Err(Error::InsufficientTickets {
                available,
                requested: quantity,
            });
        }

        let status = TicketStatus::from_seats(seats, event.capacity);
        Ok(Self::enrich(event, seats, revenue, status, region))
    }
}
