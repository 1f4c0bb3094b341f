//! # Catalog Commands

use tracing::info;

use crate::error::CliError;
use stockpile_core::{NewProduct, NewSupplier, NewWarehouse, Product, Supplier, Warehouse};
use stockpile_db::Database;

pub async fn add_supplier(db: &Database, input: NewSupplier) -> Result<Supplier, CliError> {
    let supplier = stockpile_db::create_supplier(db, input).await?;
    info!(supplier_id = %supplier.id, "add_supplier command");
    Ok(supplier)
}

pub async fn add_warehouse(db: &Database, input: NewWarehouse) -> Result<Warehouse, CliError> {
    let warehouse = stockpile_db::create_warehouse(db, input).await?;
    info!(warehouse_id = %warehouse.id, "add_warehouse command");
    Ok(warehouse)
}

/// Fails with `NOT_FOUND` when the supplier or warehouse id doesn't resolve.
pub async fn add_product(db: &Database, input: NewProduct) -> Result<Product, CliError> {
    let product = stockpile_db::create_product(db, input).await?;
    info!(product_id = %product.id, "add_product command");
    Ok(product)
}
