//! # Menu Session
//!
//! The interactive loop: show the menu, collect a [`Command`] through
//! prompts, dispatch it, print the result, repeat.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  show menu ──► read choice ──► prompts ──► Command                     │
//! │      ▲             │              │            │                        │
//! │      │        bad number     bad field         ▼                        │
//! │      │             │              │      runtime.block_on(dispatch)    │
//! │      │             ▼              ▼            │                        │
//! │      └──────── print "Error: ..." ◄──── Err ───┤                        │
//! │      │                                         │ Ok                     │
//! │      └──────────────── print outcome ◄─────────┘                        │
//! │                                                                         │
//! │  Exit or end of input ends the session.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Basket entry is the one prompt that repeats: a malformed
//! `product_id,quantity` entry is reported and asked for again rather than
//! abandoning the order.

use std::io::{BufRead, Write};

use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::commands::{self, Command, Outcome};
use crate::error::CliError;
use crate::render;
use stockpile_core::validation::{parse_basket_entry, parse_id, parse_integer, validate_name};
use stockpile_core::{
    Money, NewProduct, NewSupplier, NewWarehouse, OrderRequest, ValidationError, BASKET_TERMINATOR,
};
use stockpile_db::Database;

const MENU: &str = "\
*** Inventory Management System ***
1. Add Supplier
2. Add Warehouse
3. Add Product
4. Place Order
5. View Inventory
6. Exit";

/// Why command collection stopped early.
enum Abort {
    /// Input closed.
    Eof,
    /// Operator typed something unusable; back to the menu.
    Invalid(CliError),
    /// Terminal failure; ends the session.
    Io(std::io::Error),
}

impl From<std::io::Error> for Abort {
    fn from(err: std::io::Error) -> Self {
        Abort::Io(err)
    }
}

impl From<ValidationError> for Abort {
    fn from(err: ValidationError) -> Self {
        Abort::Invalid(err.into())
    }
}

type Step<T> = Result<T, Abort>;

/// One operator session over any line-based input and output.
pub struct Session<'a, R, W> {
    db: &'a Database,
    runtime: &'a Runtime,
    input: R,
    output: W,
    currency: String,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(db: &'a Database, runtime: &'a Runtime, input: R, output: W) -> Self {
        Session {
            db,
            runtime,
            input,
            output,
            currency: "$".to_string(),
        }
    }

    /// Sets the symbol used when printing prices.
    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    /// Runs until Exit or end of input.
    ///
    /// ## Errors
    /// Only terminal I/O failures. Command failures are printed and the
    /// menu is shown again.
    pub fn run(&mut self) -> Result<(), CliError> {
        info!("Session started");

        loop {
            writeln!(self.output, "\n{}", MENU)?;

            let command = match self.read_command() {
                Ok(command) => command,
                Err(Abort::Eof) => {
                    writeln!(self.output)?;
                    info!("Input closed, ending session");
                    break;
                }
                Err(Abort::Invalid(err)) => {
                    debug!(error = %err, "Rejected menu input");
                    writeln!(self.output, "{}", render::error(&err))?;
                    continue;
                }
                Err(Abort::Io(err)) => return Err(err.into()),
            };

            match self.runtime.block_on(commands::dispatch(self.db, command)) {
                Ok(Outcome::Exit) => {
                    writeln!(self.output, "{}", render::outcome(&Outcome::Exit, &self.currency))?;
                    break;
                }
                Ok(outcome) => {
                    writeln!(self.output, "{}", render::outcome(&outcome, &self.currency))?
                }
                Err(err) => writeln!(self.output, "{}", render::error(&err))?,
            }
        }

        info!("Session ended");
        Ok(())
    }

    // =========================================================================
    // Command Collection
    // =========================================================================

    fn read_command(&mut self) -> Step<Command> {
        let choice = self.ask("Enter your choice")?;

        match parse_integer("menu choice", &choice)? {
            1 => self.collect_supplier(),
            2 => self.collect_warehouse(),
            3 => self.collect_product(),
            4 => self.collect_order(),
            5 => Ok(Command::ViewInventory),
            6 => Ok(Command::Exit),
            other => Err(Abort::Invalid(CliError::validation(format!(
                "Invalid choice {}. Please enter a number from 1 to 6.",
                other
            )))),
        }
    }

    fn collect_supplier(&mut self) -> Step<Command> {
        let name = self.ask("Supplier name")?;
        let email = self.ask("Email (optional)")?;
        let phone = self.ask("Phone (optional)")?;

        Ok(Command::AddSupplier(
            NewSupplier::new(name).with_email(email).with_phone(phone),
        ))
    }

    fn collect_warehouse(&mut self) -> Step<Command> {
        let name = self.ask("Warehouse name")?;
        let location = self.ask("Location (optional)")?;

        Ok(Command::AddWarehouse(
            NewWarehouse::new(name).with_location(location),
        ))
    }

    fn collect_product(&mut self) -> Step<Command> {
        let name = self.ask("Product name")?;
        let supplier_id = parse_id("supplier id", &self.ask("Supplier ID")?)?;
        let unit_price = Money::parse(&self.ask("Unit price")?)?;
        let stock_quantity = parse_integer("stock quantity", &self.ask("Stock quantity")?)?;
        let warehouse_id = parse_id("warehouse id", &self.ask("Warehouse ID")?)?;

        Ok(Command::AddProduct(NewProduct {
            name,
            supplier_id,
            unit_price_cents: unit_price.cents(),
            stock_quantity,
            warehouse_id,
        }))
    }

    fn collect_order(&mut self) -> Step<Command> {
        let customer_name = validate_name("customer name", &self.ask("Customer name")?)?;
        writeln!(
            self.output,
            "Enter items as product_id,quantity. Type '{}' to finish.",
            BASKET_TERMINATOR
        )?;

        let mut lines = Vec::new();
        loop {
            let entry = self.ask("Item")?;
            if entry.eq_ignore_ascii_case(BASKET_TERMINATOR) {
                break;
            }

            match parse_basket_entry(&entry) {
                Ok(line) => lines.push(line),
                Err(err) => writeln!(self.output, "{}", render::error(&CliError::from(err)))?,
            }
        }

        Ok(Command::PlaceOrder(OrderRequest::new(customer_name, lines)))
    }

    /// Prints `label: ` and reads one trimmed line.
    fn ask(&mut self, label: &str) -> Step<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Abort::Eof);
        }

        Ok(line.trim().to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
