//! # Inventory Commands

use tracing::debug;

use crate::error::CliError;
use stockpile_core::InventoryRow;
use stockpile_db::Database;

/// Lists every product with supplier and warehouse names, by product id.
pub async fn view_inventory(db: &Database) -> Result<Vec<InventoryRow>, CliError> {
    let rows = db.products().list_inventory().await?;
    debug!(count = rows.len(), "view_inventory command");
    Ok(rows)
}
