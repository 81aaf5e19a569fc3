//! Core error types for the festival scheduling engine.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the scheduling engine.
///
/// Not-found and scheduling conflicts are expected, user-facing outcomes.
/// Everything under `Database`, `External` and `Unexpected` is a fault.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Stage with id {0} was not found")]
    StageNotFound(String),

    #[error("Event with id {0} was not found")]
    EventNotFound(String),

    #[error("Stage {stage_id} is not available at {start_time}")]
    StageUnavailable {
        stage_id: String,
        start_time: NaiveDateTime,
    },

    #[error("Not enough tickets available. Available: {available}, requested: {requested}")]
    InsufficientTickets { available: i64, requested: i64 },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("External service call failed: {0}")]
    External(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Returns true for outcomes that mean "the thing you asked about does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::StageNotFound(_)
                | Error::EventNotFound(_)
                | Error::Database(DatabaseError::NotFound(_))
        )
    }

    /// Returns true for scheduling conflicts, whether detected by the engine
    /// or rejected by the store.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Error::StageUnavailable { .. }
                | Error::ConstraintViolation(_)
                | Error::Database(DatabaseError::UniqueViolation(_))
        )
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate stage name).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}
