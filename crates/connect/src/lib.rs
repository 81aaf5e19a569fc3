//! Festival Connect - clients for the services around the scheduling engine.
//!
//! The scheduling engine itself never waits on these collaborators; they are
//! only used to enrich events with ticket sales data.

pub mod client;

// Re-export commonly used types
pub use client::{TicketServiceClient, DEFAULT_TICKET_SERVICE_URL};
