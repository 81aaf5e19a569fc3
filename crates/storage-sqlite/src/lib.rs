//! SQLite storage implementation for the festival scheduling engine.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `festival-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations, including the triggers that keep stage windows disjoint
//! - Repository implementations for stages and events
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `festival-core` is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!      storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```
//!
//! All writes go through a single writer task ([`WriteHandle`]). Each write
//! runs in an immediate transaction and re-checks the stage's schedule before
//! touching the `events` table.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod events;
pub mod stages;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from festival-core for convenience
pub use festival_core::errors::{DatabaseError, Error, Result};
