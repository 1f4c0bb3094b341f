//! # Repository Module
//!
//! Database repository implementations for Stockpile.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI command / service                                                 │
//! │       │                                                                 │
//! │       │  db.products().list_inventory()                                │
//! │       ▼                                                                 │
//! │  ProductRepository (owns a pool handle, one connection per call)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  module-level SQL functions  fn(&mut SqliteConnection, ..)             │
//! │       ▲                                                                 │
//! │       │                                                                 │
//! │  StoreTx (same functions, on the transaction's connection)             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every statement the transactional scope needs lives in a `pub(crate)`
//! function taking a `&mut SqliteConnection`, so the pooled repositories and
//! [`StoreTx`](crate::StoreTx) run identical SQL.
//!
//! ## Available Repositories
//!
//! - [`SupplierRepository`] - Supplier inserts and lookups
//! - [`WarehouseRepository`] - Warehouse inserts and lookups
//! - [`ProductRepository`] - Product lookups, stock, inventory listing
//! - [`OrderRepository`] - Order and order line reads

pub mod order;
pub mod product;
pub mod supplier;
pub mod warehouse;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use supplier::SupplierRepository;
pub use warehouse::WarehouseRepository;
