//! # Seed Data Generator
//!
//! Populates a database with demo records for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./inventory_dev.db
//! cargo run -p stockpile-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockpile-db --bin seed -- --db ./data/inventory.db
//! ```
//!
//! ## Generated Records
//! - Suppliers with contact details
//! - Warehouses
//! - Products spread across both, with prices and starting stock

use clap::Parser;
use std::path::PathBuf;
use stockpile_core::{Money, NewProduct, NewSupplier, NewWarehouse};
use stockpile_db::{create_product, create_supplier, create_warehouse, Database, DbConfig};

/// (name, email, phone)
const SUPPLIERS: &[(&str, &str, &str)] = &[
    ("Acme Wholesale", "orders@acme.test", "555-0100"),
    ("Northwind Traders", "sales@northwind.test", "555-0142"),
];

/// (name, location)
const WAREHOUSES: &[(&str, &str)] = &[("Main", "Dock 4"), ("Overflow", "Unit 12, Ring Road")];

/// (name, price, stock)
const PRODUCTS: &[(&str, &str, i64)] = &[
    ("Steel Bolt M8", "0.25", 500),
    ("Hex Nut M8", "0.10", 800),
    ("Cordless Drill", "89.99", 12),
    ("Safety Goggles", "7.50", 40),
    ("Work Gloves", "4.75", 65),
    ("Tape Measure 5m", "9.99", 30),
    ("Extension Cord 10m", "18.00", 15),
    ("Wood Glue 250ml", "5.49", 0),
];

/// Stockpile Seed Data Generator
#[derive(Parser, Debug)]
#[command(name = "seed")]
#[command(about = "Populates a Stockpile database with demo records")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./inventory_dev.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Stockpile Seed Data Generator");
    println!("=============================");
    println!("Database: {}", args.db.display());
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut supplier_ids = Vec::with_capacity(SUPPLIERS.len());
    for (name, email, phone) in SUPPLIERS {
        let supplier = create_supplier(
            &db,
            NewSupplier::new(*name).with_email(*email).with_phone(*phone),
        )
        .await?;
        supplier_ids.push(supplier.id);
    }

    let mut warehouse_ids = Vec::with_capacity(WAREHOUSES.len());
    for (name, location) in WAREHOUSES {
        let warehouse = create_warehouse(&db, NewWarehouse::new(*name).with_location(*location)).await?;
        warehouse_ids.push(warehouse.id);
    }

    println!(
        "✓ Created {} suppliers, {} warehouses",
        supplier_ids.len(),
        warehouse_ids.len()
    );

    let mut generated = 0;
    for (idx, (name, price, stock)) in PRODUCTS.iter().enumerate() {
        let product = NewProduct {
            name: name.to_string(),
            supplier_id: supplier_ids[idx % supplier_ids.len()],
            unit_price_cents: Money::parse(price)?.cents(),
            stock_quantity: *stock,
            warehouse_id: warehouse_ids[idx % warehouse_ids.len()],
        };

        if let Err(e) = create_product(&db, product).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }
        generated += 1;
    }

    println!("✓ Generated {} products", generated);
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
