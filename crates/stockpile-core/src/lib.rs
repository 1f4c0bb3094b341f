//! # stockpile-core: Pure Domain Logic for Stockpile
//!
//! Types, money handling and input rules for the inventory tool. Nothing in
//! here touches the database or the terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockpile Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    CLI Menu (apps/cli)                          │   │
//! │  │    prompts ──► Command ──► dispatch ──► render Outcome          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockpile-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CoreError │  │   rules   │  │   │
//! │  │   │   Order   │  │  parsing  │  │           │  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockpile-db (Database Layer)                   │   │
//! │  │       SQLite store, catalog validator, order transactions       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Supplier, Warehouse, Product, Order, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and parsing
//!
//! ## Example Usage
//!
//! ```rust
//! use stockpile_core::money::Money;
//!
//! let price = Money::parse("2.5").unwrap();
//! assert_eq!(price.cents(), 250);
//! assert_eq!(price.to_string(), "$2.50");
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum length of any name field (supplier, warehouse, product, customer).
pub const MAX_NAME_LENGTH: usize = 200;

/// Keyword that ends basket entry at the order prompt.
pub const BASKET_TERMINATOR: &str = "done";
