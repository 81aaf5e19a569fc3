//! Tickets module - enrichment of events with ticket service data.

mod tickets_model;
mod tickets_service;
mod tickets_traits;

pub use tickets_model::{EventWithTicketInfo, PricingRegion, TicketStatus};
pub use tickets_service::TicketEnrichmentService;
pub use tickets_traits::{TicketEnrichmentServiceTrait, TicketServiceClientTrait};
