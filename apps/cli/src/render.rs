//! # Rendering
//!
//! Turns command outcomes into the text printed at the menu.

use stockpile_core::{InventoryRow, Money, PlacedOrder};

use crate::commands::Outcome;
use crate::error::CliError;

const TOO_LARGE: &str = "(too large to display)";

const INVENTORY_HEADERS: [&str; 6] = ["ID", "Product", "Supplier", "Price", "Stock", "Warehouse"];

/// Text for a successful command.
pub fn outcome(outcome: &Outcome, currency: &str) -> String {
    match outcome {
        Outcome::SupplierAdded(s) => format!("Supplier '{}' added with ID {}.", s.name, s.id),
        Outcome::WarehouseAdded(w) => format!("Warehouse '{}' added with ID {}.", w.name, w.id),
        Outcome::ProductAdded(p) => format!(
            "Product '{}' added with ID {} ({} in stock at {}).",
            p.name,
            p.id,
            p.stock_quantity,
            p.unit_price().format_with(currency)
        ),
        Outcome::OrderPlaced(placed) => order(placed, currency),
        Outcome::Inventory(rows) => inventory(rows, currency),
        Outcome::Exit => "Goodbye.".to_string(),
    }
}

/// Text for a failed command.
pub fn error(err: &CliError) -> String {
    format!("Error: {}", err.message)
}

/// Order confirmation with one line per basket entry and a total.
pub fn order(placed: &PlacedOrder, currency: &str) -> String {
    let mut out = format!(
        "Order {} for {} {} at {}.",
        placed.id(),
        placed.order.customer_name,
        placed.status().as_str().to_lowercase(),
        placed.order.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for line in &placed.lines {
        out.push_str(&format!(
            "\n  product {} x {} @ {} = {}",
            line.product_id,
            line.quantity,
            line.unit_price().format_with(currency),
            amount(line.line_total(), currency)
        ));
    }

    out.push_str(&format!("\n  Total: {}", amount(placed.total(), currency)));
    out
}

fn amount(money: Option<Money>, currency: &str) -> String {
    money.map_or_else(|| TOO_LARGE.to_string(), |m| m.format_with(currency))
}

/// Inventory table, or a single line when the catalog is empty.
///
/// ```text
/// ID  Product  Supplier  Price  Stock  Warehouse
/// 1   P1       S1        $2.50  6      W1
/// ```
pub fn inventory(rows: &[InventoryRow], currency: &str) -> String {
    if rows.is_empty() {
        return "No products in inventory.".to_string();
    }

    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                row.product_id.to_string(),
                row.product_name.clone(),
                row.supplier_name.clone(),
                row.unit_price().format_with(currency),
                row.stock_quantity.to_string(),
                row.warehouse_name.clone(),
            ]
        })
        .collect();

    let mut widths = INVENTORY_HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let headers = INVENTORY_HEADERS.map(str::to_string);
    std::iter::once(&headers)
        .chain(cells.iter())
        .map(|row| format_row(row, &widths))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_row(row: &[String; 6], widths: &[usize; 6]) -> String {
    row.iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
