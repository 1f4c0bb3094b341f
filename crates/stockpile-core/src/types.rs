//! # Domain Types
//!
//! Core domain types used throughout Stockpile.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Supplier     │   │    Product      │   │   Warehouse     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  supplier_id    │   │  id             │       │
//! │  │  name           │   │  warehouse_id   │──►│  name           │       │
//! │  │  email (unique) │   │  unit_price     │   │  location       │       │
//! │  │  phone          │   │  stock_quantity │   └─────────────────┘       │
//! │  └─────────────────┘   └────────▲────────┘                              │
//! │                                 │                                       │
//! │  ┌─────────────────┐   ┌────────┴────────┐   ┌─────────────────┐       │
//! │  │     Order       │◄──│   OrderLine     │   │  OrderStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  order_id       │   │  Pending        │       │
//! │  │  customer_name  │   │  product_id     │   │  Completed      │       │
//! │  │  created_at     │   │  quantity       │   │  Cancelled      │       │
//! │  │  status         │   │  unit_price     │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Records vs Inputs
//! Stored records (`Supplier`, `Product`, ...) carry a store-generated `id`.
//! Inputs (`NewSupplier`, `NewProduct`, ...) are what the operator submits;
//! each has a `validate()` that runs before any database work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{
    normalize_optional, validate_email, validate_name, validate_price_cents, validate_quantity,
    validate_stock_quantity, ValidationResult,
};

// =============================================================================
// Supplier
// =============================================================================

/// A supplier of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    /// Unique across suppliers when present.
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Input for creating a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NewSupplier {
    pub fn new(name: impl Into<String>) -> Self {
        NewSupplier {
            name: name.into(),
            email: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Validates and normalizes the input.
    ///
    /// Names are trimmed; blank email and phone become `None`.
    pub fn validate(self) -> ValidationResult<Self> {
        let name = validate_name("supplier name", &self.name)?;
        let email = normalize_optional(self.email);
        if let Some(email) = &email {
            validate_email(email)?;
        }

        Ok(NewSupplier {
            name,
            email,
            phone: normalize_optional(self.phone),
        })
    }
}

// =============================================================================
// Warehouse
// =============================================================================

/// A storage location for products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
}

/// Input for creating a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWarehouse {
    pub name: String,
    pub location: Option<String>,
}

impl NewWarehouse {
    pub fn new(name: impl Into<String>) -> Self {
        NewWarehouse {
            name: name.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn validate(self) -> ValidationResult<Self> {
        Ok(NewWarehouse {
            name: validate_name("warehouse name", &self.name)?,
            location: normalize_optional(self.location),
        })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stocked product.
///
/// `stock_quantity` is only ever changed by order placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub supplier_id: i64,
    /// Price in cents.
    pub unit_price_cents: i64,
    pub stock_quantity: i64,
    pub warehouse_id: i64,
}

impl Product {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub supplier_id: i64,
    pub unit_price_cents: i64,
    pub stock_quantity: i64,
    pub warehouse_id: i64,
}

impl NewProduct {
    pub fn validate(self) -> ValidationResult<Self> {
        validate_price_cents(self.unit_price_cents)?;
        validate_stock_quantity(self.stock_quantity)?;

        Ok(NewProduct {
            name: validate_name("product name", &self.name)?,
            ..self
        })
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of an order.
///
/// ```text
/// Pending ──(every line committed)──► Completed
///    │
///    └──(any line rejected)──► rolled back, never stored
/// ```
///
/// `Cancelled` exists in the schema for orders voided after the fact; nothing
/// in this tool produces it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Text stored in the `orders.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// One product/quantity pair committed against an order.
///
/// The unit price is frozen at the moment the line is committed so the order
/// keeps its value if the product price changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl OrderLine {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Price times quantity, `None` if it does not fit in `Money`.
    #[inline]
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price().checked_mul(self.quantity)
    }
}

// =============================================================================
// Basket
// =============================================================================

/// One requested `(product_id, quantity)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketLine {
    pub product_id: i64,
    pub quantity: i64,
}

impl BasketLine {
    pub const fn new(product_id: i64, quantity: i64) -> Self {
        BasketLine {
            product_id,
            quantity,
        }
    }
}

impl From<(i64, i64)> for BasketLine {
    fn from((product_id, quantity): (i64, i64)) -> Self {
        BasketLine::new(product_id, quantity)
    }
}

/// A customer's full order request.
///
/// Lines are kept in input order; duplicates are allowed and accumulate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub lines: Vec<BasketLine>,
}

impl OrderRequest {
    pub fn new(customer_name: impl Into<String>, lines: Vec<BasketLine>) -> Self {
        OrderRequest {
            customer_name: customer_name.into(),
            lines,
        }
    }

    /// Builds a request from `(product_id, quantity)` pairs.
    pub fn from_pairs(customer_name: impl Into<String>, pairs: &[(i64, i64)]) -> Self {
        OrderRequest::new(
            customer_name,
            pairs.iter().copied().map(BasketLine::from).collect(),
        )
    }

    /// Checks the request shape before any stock is looked at.
    ///
    /// ## Rules
    /// - customer name non-empty (trimmed)
    /// - at least one line
    /// - every quantity strictly positive
    pub fn validate(self) -> CoreResult<Self> {
        let customer_name = validate_name("customer name", &self.customer_name)?;

        if self.lines.is_empty() {
            return Err(CoreError::EmptyBasket);
        }

        for line in &self.lines {
            validate_quantity(line.quantity)?;
        }

        Ok(OrderRequest {
            customer_name,
            lines: self.lines,
        })
    }
}

/// A committed order together with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

impl PlacedOrder {
    #[inline]
    pub fn id(&self) -> i64 {
        self.order.id
    }

    #[inline]
    pub fn status(&self) -> OrderStatus {
        self.order.status
    }

    /// Sum of the line totals, `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.lines
            .iter()
            .try_fold(Money::zero(), |acc, line| acc.checked_add(line.line_total()?))
    }
}

// =============================================================================
// Inventory Listing
// =============================================================================

/// One row of the inventory report (product joined with supplier and warehouse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryRow {
    pub product_id: i64,
    pub product_name: String,
    pub supplier_name: String,
    pub unit_price_cents: i64,
    pub stock_quantity: i64,
    pub warehouse_name: String,
}

impl InventoryRow {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_order_status_default_and_text() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(OrderStatus::Completed.to_string(), "Completed");
        assert_eq!(OrderStatus::Cancelled.as_str(), "Cancelled");
    }

    #[test]
    fn test_order_status_serde() {
        let json = serde_json::to_string(&OrderStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_new_supplier_normalizes_blanks() {
        let supplier = NewSupplier::new("  Acme  ")
            .with_email("  ")
            .with_phone("")
            .validate()
            .unwrap();

        assert_eq!(supplier.name, "Acme");
        assert_eq!(supplier.email, None);
        assert_eq!(supplier.phone, None);
    }

    #[test]
    fn test_new_supplier_rejects_bad_email() {
        let err = NewSupplier::new("Acme")
            .with_email("not-an-email")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_new_warehouse_requires_name() {
        assert!(NewWarehouse::new("   ").validate().is_err());
        let wh = NewWarehouse::new("Main").with_location("Dock 4").validate().unwrap();
        assert_eq!(wh.location.as_deref(), Some("Dock 4"));
    }

    #[test]
    fn test_new_product_rules() {
        let base = NewProduct {
            name: "Widget".to_string(),
            supplier_id: 1,
            unit_price_cents: 250,
            stock_quantity: 10,
            warehouse_id: 1,
        };
        assert!(base.clone().validate().is_ok());

        let free = NewProduct {
            unit_price_cents: 0,
            stock_quantity: 0,
            ..base.clone()
        };
        assert!(free.validate().is_ok());

        let negative_price = NewProduct {
            unit_price_cents: -1,
            ..base.clone()
        };
        assert!(negative_price.validate().is_err());

        let negative_stock = NewProduct {
            stock_quantity: -5,
            ..base
        };
        assert!(negative_stock.validate().is_err());
    }

    #[test]
    fn test_order_request_validation() {
        let ok = OrderRequest::from_pairs(" Alice ", &[(1, 4), (1, 2)]).validate().unwrap();
        assert_eq!(ok.customer_name, "Alice");
        assert_eq!(ok.lines.len(), 2);

        assert_eq!(
            OrderRequest::new("Alice", Vec::new()).validate(),
            Err(CoreError::EmptyBasket)
        );
        assert!(matches!(
            OrderRequest::from_pairs("", &[(1, 1)]).validate(),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            OrderRequest::from_pairs("Bob", &[(1, 2), (2, 0)]).validate(),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(OrderRequest::from_pairs("Bob", &[(1, -3)]).validate().is_err());
    }

    #[test]
    fn test_placed_order_totals() {
        let now = Utc::now();
        let placed = PlacedOrder {
            order: Order {
                id: 1,
                customer_name: "Alice".to_string(),
                created_at: now,
                status: OrderStatus::Completed,
            },
            lines: vec![
                OrderLine {
                    id: 1,
                    order_id: 1,
                    product_id: 1,
                    quantity: 4,
                    unit_price_cents: 250,
                },
                OrderLine {
                    id: 2,
                    order_id: 1,
                    product_id: 2,
                    quantity: 1,
                    unit_price_cents: 199,
                },
            ],
        };

        assert_eq!(placed.total(), Some(Money::from_cents(1199)));
        assert_eq!(placed.lines[0].line_total(), Some(Money::from_cents(1000)));
        assert_eq!(placed.status(), OrderStatus::Completed);
    }

    #[test]
    fn test_totals_overflow_to_none() {
        let line = |id: i64, product_id: i64, quantity: i64, unit_price_cents: i64| OrderLine {
            id,
            order_id: 1,
            product_id,
            quantity,
            unit_price_cents,
        };
        let mut placed = PlacedOrder {
            order: Order {
                id: 1,
                customer_name: "Zed".to_string(),
                created_at: Utc::now(),
                status: OrderStatus::Completed,
            },
            // $10,000,000,000,000 x 1,000,000
            lines: vec![line(1, 1, 1_000_000, 1_000_000_000_000_000)],
        };

        assert_eq!(placed.lines[0].line_total(), None);
        assert_eq!(placed.total(), None);

        // Each line fits, the sum does not
        placed.lines = vec![line(1, 1, 1, i64::MAX), line(2, 2, 1, 1)];
        assert!(placed.lines.iter().all(|l| l.line_total().is_some()));
        assert_eq!(placed.total(), None);
    }
}
