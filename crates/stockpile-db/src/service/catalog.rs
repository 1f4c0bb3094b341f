//! # Catalog
//!
//! Creating suppliers, warehouses and products.
//!
//! ```text
//! create_product(new)
//!   │
//!   ├── 1. NewProduct::validate()          name, price >= 0, stock >= 0
//!   ├── 2. BEGIN
//!   ├── 3. validate_references()           supplier first, then warehouse
//!   ├── 4. INSERT products
//!   └── 5. COMMIT                          any failure → ROLLBACK, no row
//! ```

use tracing::{info, warn};

use super::{ServiceError, ServiceResult};
use crate::pool::Database;
use crate::tx::StoreTx;
use stockpile_core::{
    CoreError, NewProduct, NewSupplier, NewWarehouse, Product, Supplier, Warehouse,
};

/// Validates and stores a supplier.
pub async fn create_supplier(db: &Database, input: NewSupplier) -> ServiceResult<Supplier> {
    let input = input.validate()?;
    let supplier = db.suppliers().create(&input).await?;

    info!(supplier_id = %supplier.id, name = %supplier.name, "Supplier added");
    Ok(supplier)
}

/// Validates and stores a warehouse.
pub async fn create_warehouse(db: &Database, input: NewWarehouse) -> ServiceResult<Warehouse> {
    let input = input.validate()?;
    let warehouse = db.warehouses().create(&input).await?;

    info!(warehouse_id = %warehouse.id, name = %warehouse.name, "Warehouse added");
    Ok(warehouse)
}

/// Confirms both references resolve.
///
/// ## Errors
/// * `CoreError::SupplierNotFound` - checked first
/// * `CoreError::WarehouseNotFound`
pub async fn validate_references(
    tx: &mut StoreTx,
    supplier_id: i64,
    warehouse_id: i64,
) -> ServiceResult<()> {
    if !tx.supplier_exists(supplier_id).await? {
        return Err(CoreError::SupplierNotFound(supplier_id).into());
    }

    if !tx.warehouse_exists(warehouse_id).await? {
        return Err(CoreError::WarehouseNotFound(warehouse_id).into());
    }

    Ok(())
}

/// Validates a product, checks its references and stores it, all in one
/// transaction.
pub async fn create_product(db: &Database, input: NewProduct) -> ServiceResult<Product> {
    let input = input.validate()?;

    let mut tx = db.begin().await?;

    match insert_checked(&mut tx, &input).await {
        Ok(product) => {
            tx.commit().await?;
            info!(product_id = %product.id, name = %product.name, "Product added");
            Ok(product)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback after rejected product failed");
            }
            warn!(
                supplier_id = %input.supplier_id,
                warehouse_id = %input.warehouse_id,
                reason = %err,
                "Product rejected"
            );
            Err(err)
        }
    }
}

async fn insert_checked(tx: &mut StoreTx, input: &NewProduct) -> Result<Product, ServiceError> {
    validate_references(tx, input.supplier_id, input.warehouse_id).await?;
    Ok(tx.insert_product(input).await?)
}
