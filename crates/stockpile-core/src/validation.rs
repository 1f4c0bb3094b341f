//! # Validation Module
//!
//! Input validation and parsing for Stockpile.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI prompt                                                   │
//! │  └── THIS MODULE: parse_id, parse_count, parse_basket_entry            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain input (NewProduct::validate, OrderRequest::validate)  │
//! │  └── THIS MODULE: validate_name, validate_quantity, ...                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (supplier email)                                           │
//! │  └── Foreign keys                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockpile_core::validation::{parse_basket_entry, validate_quantity};
//!
//! let line = parse_basket_entry("3, 4").unwrap();
//! assert_eq!((line.product_id, line.quantity), (3, 4));
//!
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::BasketLine;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_NAME_LENGTH` characters
///
/// ## Example
/// ```rust
/// use stockpile_core::validation::validate_name;
///
/// assert_eq!(validate_name("product name", "  Widget ").unwrap(), "Widget");
/// assert!(validate_name("product name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(value.to_string())
}

/// Trims an optional field; blank values become `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validates an email address.
///
/// Only the shape is checked: one `@` with text on both sides and no spaces.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::invalid_format("email", "expected name@domain");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(invalid()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested quantity on a basket line.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ```text
/// (product 7, qty 0)  ──► MustBePositive, rejected before any stock check
/// (product 7, qty -2) ──► MustBePositive
/// (product 7, qty 3)  ──► OK → stock check inside the transaction
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates an initial stock quantity (zero allowed).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Example
/// ```rust
/// use stockpile_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(250).is_ok());  // $2.50
/// assert!(validate_price_cents(0).is_ok());    // Free item
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Parsers (operator text → values)
// =============================================================================

/// Parses a whole number typed by the operator.
pub fn parse_integer(field: &str, input: &str) -> ValidationResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::required(field));
    }

    input
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is not a whole number", input)))
}

/// Parses a record id (must be positive).
pub fn parse_id(field: &str, input: &str) -> ValidationResult<i64> {
    let id = parse_integer(field, input)?;
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(id)
}

/// Parses one `product_id,quantity` basket entry.
///
/// ## Rules
/// - Exactly two comma-separated whole numbers, whitespace ignored
/// - Product id positive, quantity positive
///
/// ## Example
/// ```rust
/// use stockpile_core::validation::parse_basket_entry;
///
/// assert!(parse_basket_entry("1,4").is_ok());
/// assert!(parse_basket_entry("1").is_err());
/// assert!(parse_basket_entry("1,x").is_err());
/// assert!(parse_basket_entry("1,0").is_err());
/// ```
pub fn parse_basket_entry(input: &str) -> ValidationResult<BasketLine> {
    let mut parts = input.split(',');

    let (Some(product), Some(quantity), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::invalid_format(
            "order line",
            "expected product_id,quantity",
        ));
    };

    let product_id = parse_id("product id", product)?;
    let quantity = parse_integer("quantity", quantity)?;
    validate_quantity(quantity)?;

    Ok(BasketLine::new(product_id, quantity))
}

// =============================================================================
// Unit Tests
// =============================================================================
