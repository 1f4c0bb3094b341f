//! # Order Commands

use tracing::debug;

use crate::error::CliError;
use stockpile_core::{OrderRequest, PlacedOrder};
use stockpile_db::Database;

/// Places an order through the transaction engine.
///
/// On rejection nothing has been written; the error names the offending
/// product.
pub async fn place_order(db: &Database, request: OrderRequest) -> Result<PlacedOrder, CliError> {
    debug!(
        customer = %request.customer_name,
        lines = request.lines.len(),
        "place_order command"
    );

    Ok(stockpile_db::place_order(db, request).await?)
}
