//! Festival Core - Domain entities, services, and traits.
//!
//! This crate contains the stage-scheduling engine and the event/stage
//! business logic. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` and `connect` crates.

pub mod constants;
pub mod errors;
pub mod events;
pub mod stages;
pub mod tickets;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
