//! # Error Types
//!
//! Domain-specific error types for stockpile-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockpile-core errors (this file)                                     │
//! │  ├── CoreError        - Domain rejections (stock, missing references)  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockpile-db errors (separate crate)                                  │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── ServiceError     - CoreError | DbError from engine & validator    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → CliError → stdout  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rejections.
///
/// Every variant is recoverable: the store is unchanged and the operator can
/// retry with different input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A basket line references a product id that does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// A product references a supplier id that does not exist.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(i64),

    /// A product references a warehouse id that does not exist.
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(i64),

    /// Not enough stock to satisfy a basket line.
    ///
    /// ## User Workflow
    /// ```text
    /// Basket: [(7, 6), (7, 6)]   stock of product 7 = 10
    ///      │
    ///      ▼
    /// line 1: 10 >= 6 → stock 4 (inside the transaction)
    /// line 2:  4 <  6 → InsufficientStock { product_id: 7, available: 4, requested: 6 }
    ///      │
    ///      ▼
    /// Rollback: stock back to 10, no order row
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// An order was submitted without any lines.
    #[error("Order must contain at least one line")]
    EmptyBasket,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the product id a stock rejection refers to, if any.
    pub fn product_id(&self) -> Option<i64> {
        match self {
            CoreError::ProductNotFound(id) => Some(*id),
            CoreError::InsufficientStock { product_id, .. } => Some(*product_id),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any database work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (not a number, bad email, bad basket entry).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
