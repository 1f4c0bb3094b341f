//! # CLI Error Type
//!
//! Unified error type for menu commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockpile                              │
//! │                                                                         │
//! │  commands::dispatch(Command)                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ServiceError::Rejected(CoreError) ─┐                                  │
//! │  ServiceError::Storage(DbError) ────┼──► CliError { code, message }    │
//! │  ValidationError (prompt parsing) ──┘          │                        │
//! │                                                ▼                        │
//! │                              "Error: <message>" printed,               │
//! │                              menu shown again                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is recoverable at the menu. Only startup failures (config,
//! database connection) end the process.

use serde::Serialize;
use thiserror::Error;

use stockpile_core::{CoreError, ValidationError};
use stockpile_db::{DbError, ServiceError};

/// Error reported to the operator.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for product 1: available 4, requested 6"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced record doesn't exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Basket line exceeds available stock
    InsufficientStock,

    /// Database operation failed
    DatabaseError,

    /// Bad flags or config file
    Config,

    /// Terminal read/write failed
    Io,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Config, message)
    }
}

/// Converts database errors, keeping the underlying cause in the message.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => CliError::new(ErrorCode::NotFound, err.to_string()),
            DbError::UniqueViolation { .. } => {
                CliError::new(ErrorCode::ValidationError, err.to_string())
            }
            other => {
                tracing::error!(error = %other, "Database operation failed");
                CliError::new(
                    ErrorCode::DatabaseError,
                    format!("Database error: {}", other),
                )
            }
        }
    }
}

/// Converts domain rejections.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_)
            | CoreError::SupplierNotFound(_)
            | CoreError::WarehouseNotFound(_) => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::EmptyBasket | CoreError::Validation(_) => ErrorCode::ValidationError,
        };

        // Validation already reads as a sentence; skip the "Validation error:" prefix
        let message = match err {
            CoreError::Validation(inner) => inner.to_string(),
            other => other.to_string(),
        };

        CliError::new(code, message)
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<ServiceError> for CliError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected(core) => core.into(),
            ServiceError::Storage(db) => db.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::Io, format!("I/O error: {}", err))
    }
}
