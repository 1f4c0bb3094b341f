//! # stockpile-db: Database Layer for Stockpile
//!
//! Storage, transactions and the multi-step operations built on them.
//! SQLite through sqlx, fully async.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockpile Data Flow                              │
//! │                                                                         │
//! │  CLI command (PlaceOrder)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockpile-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   service::order::place_order   service::catalog::*            │   │
//! │  │            │                          │                        │   │
//! │  │            ▼                          ▼                        │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  + StoreTx    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Supplier      │    │ 001_initial  │  │   │
//! │  │   │ begin()       │    │ Warehouse     │    │   _schema    │  │   │
//! │  │   │               │    │ Product/Order │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (inventory.db)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Supplier, warehouse, product and order repositories
//! - [`tx`] - Transactional scope
//! - [`service`] - Catalog validator and order transaction engine
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockpile_core::OrderRequest;
//! use stockpile_db::{place_order, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("inventory.db")).await?;
//! let placed = place_order(&db, OrderRequest::from_pairs("Alice", &[(1, 4)])).await?;
//! let rows = db.products().list_inventory().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;
pub mod tx;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use tx::StoreTx;

pub use repository::{OrderRepository, ProductRepository, SupplierRepository, WarehouseRepository};

pub use service::catalog::{create_product, create_supplier, create_warehouse, validate_references};
pub use service::order::place_order;
pub use service::{ServiceError, ServiceResult};
