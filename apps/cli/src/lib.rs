//! # Stockpile CLI Library
//!
//! Everything behind the `stockpile` binary, kept in a library so the menu
//! and commands can be driven from tests.
//!
//! ## Module Organization
//! ```text
//! stockpile_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Flags, AppConfig resolution
//! ├── error.rs        ◄─── CliError for commands
//! ├── menu.rs         ◄─── Interactive session (prompts → Command)
//! ├── render.rs       ◄─── Outcome → text
//! └── commands/
//!     ├── mod.rs      ◄─── Command, Outcome, dispatch
//!     ├── catalog.rs  ◄─── Suppliers, warehouses, products
//!     ├── order.rs    ◄─── Order placement
//!     └── inventory.rs◄─── Inventory listing
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod render;

use std::process::ExitCode;

use clap::Parser;
use tokio::runtime::Builder;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, CliArgs};
use error::CliError;
use menu::Session;
use stockpile_db::{Database, DbConfig};

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse flags (clap) ─────── bad flag → usage, exit code 2           │
/// │  2. Resolve AppConfig ──────── flags > env > JSON file > defaults      │
/// │  3. Initialize Logging ─────── stderr, EnvFilter (RUST_LOG wins)       │
/// │  4. Determine Database Path ── --db / STOCKPILE_DB_PATH / data dir     │
/// │  5. Connect & Migrate ──────── current-thread tokio runtime            │
/// │  6. Menu session on stdin/stdout until Exit or end of input            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let args = CliArgs::parse();

    let config = match AppConfig::resolve(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", render::error(&err));
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_filter);

    match start(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code, error = %err, "Stockpile stopped");
            eprintln!("{}", render::error(&err));
            ExitCode::FAILURE
        }
    }
}

fn start(config: &AppConfig) -> Result<(), CliError> {
    let db_path = config.database_path()?;
    info!(db_path = %db_path.display(), "Starting Stockpile");

    let runtime = Builder::new_current_thread().enable_all().build()?;

    let db = runtime.block_on(Database::new(
        DbConfig::new(&db_path).max_connections(config.max_connections),
    ))?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = Session::new(&db, &runtime, stdin.lock(), stdout.lock())
        .currency_symbol(config.currency_symbol.as_str())
        .run();

    runtime.block_on(db.close());
    result
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (overrides everything)
/// - `-v` - `stockpile=debug`
/// - Default: warnings, plus info from stockpile crates
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
