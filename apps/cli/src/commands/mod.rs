//! # Commands
//!
//! The closed set of things an operator can ask for, and the single handler
//! that runs them.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  menu (text) ──► Command ──► dispatch(&db, command) ──► Outcome        │
//! │                                     │                      │           │
//! │                                     │ CliError             ▼           │
//! │                                     └────────────► render (text)       │
//! │                                                                         │
//! │  dispatch knows nothing about prompts or stdout; the menu knows        │
//! │  nothing about SQL.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod inventory;
pub mod order;

use serde::Serialize;

use crate::error::CliError;
use stockpile_core::{
    InventoryRow, NewProduct, NewSupplier, NewWarehouse, OrderRequest, PlacedOrder, Product,
    Supplier, Warehouse,
};
use stockpile_db::Database;

/// A fully-collected operator request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddSupplier(NewSupplier),
    AddWarehouse(NewWarehouse),
    AddProduct(NewProduct),
    PlaceOrder(OrderRequest),
    ViewInventory,
    Exit,
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddSupplier(_) => "add_supplier",
            Command::AddWarehouse(_) => "add_warehouse",
            Command::AddProduct(_) => "add_product",
            Command::PlaceOrder(_) => "place_order",
            Command::ViewInventory => "view_inventory",
            Command::Exit => "exit",
        }
    }
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    SupplierAdded(Supplier),
    WarehouseAdded(Warehouse),
    ProductAdded(Product),
    OrderPlaced(PlacedOrder),
    Inventory(Vec<InventoryRow>),
    Exit,
}

/// Runs a command against the database.
pub async fn dispatch(db: &Database, command: Command) -> Result<Outcome, CliError> {
    tracing::debug!(command = command.name(), "Dispatching command");

    match command {
        Command::AddSupplier(input) => catalog::add_supplier(db, input)
            .await
            .map(Outcome::SupplierAdded),
        Command::AddWarehouse(input) => catalog::add_warehouse(db, input)
            .await
            .map(Outcome::WarehouseAdded),
        Command::AddProduct(input) => catalog::add_product(db, input)
            .await
            .map(Outcome::ProductAdded),
        Command::PlaceOrder(request) => order::place_order(db, request)
            .await
            .map(Outcome::OrderPlaced),
        Command::ViewInventory => inventory::view_inventory(db)
            .await
            .map(Outcome::Inventory),
        Command::Exit => Ok(Outcome::Exit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockpile_db::DbConfig;

    #[tokio::test]
    async fn test_dispatch_covers_every_command() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let supplier = dispatch(&db, Command::AddSupplier(NewSupplier::new("S1")))
            .await
            .unwrap();
        assert!(matches!(supplier, Outcome::SupplierAdded(ref s) if s.id == 1));

        let warehouse = dispatch(&db, Command::AddWarehouse(NewWarehouse::new("W1")))
            .await
            .unwrap();
        assert!(matches!(warehouse, Outcome::WarehouseAdded(ref w) if w.id == 1));

        let product = NewProduct {
            name: "P1".to_string(),
            supplier_id: 1,
            unit_price_cents: 250,
            stock_quantity: 10,
            warehouse_id: 1,
        };
        assert!(matches!(
            dispatch(&db, Command::AddProduct(product)).await.unwrap(),
            Outcome::ProductAdded(_)
        ));

        let placed = dispatch(
            &db,
            Command::PlaceOrder(OrderRequest::from_pairs("Alice", &[(1, 4)])),
        )
        .await
        .unwrap();
        assert!(matches!(placed, Outcome::OrderPlaced(ref p) if p.lines[0].quantity == 4));

        match dispatch(&db, Command::ViewInventory).await.unwrap() {
            Outcome::Inventory(rows) => assert_eq!(rows[0].stock_quantity, 6),
            other => panic!("unexpected outcome {other:?}"),
        }

        assert_eq!(dispatch(&db, Command::Exit).await.unwrap(), Outcome::Exit);
    }

    #[tokio::test]
    async fn test_dispatch_reports_rejections() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = dispatch(
            &db,
            Command::PlaceOrder(OrderRequest::from_pairs("Alice", &[(1, 1)])),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = dispatch(
            &db,
            Command::AddProduct(NewProduct {
                name: "Orphan".to_string(),
                supplier_id: 1,
                unit_price_cents: 100,
                stock_quantity: 1,
                warehouse_id: 1,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Supplier not found: 1");
    }

    #[test]
    fn test_outcome_serializes_with_kind() {
        let json = serde_json::to_value(Outcome::Inventory(Vec::new())).unwrap();
        assert_eq!(json["kind"], "inventory");
    }
}
