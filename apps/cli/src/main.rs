//! # Stockpile Entry Point
//!
//! ## Startup Sequence
//! 1. Parse command-line flags
//! 2. Resolve configuration (flags > env > config file > defaults)
//! 3. Initialize tracing (stderr)
//! 4. Connect to database & run migrations
//! 5. Run the menu on stdin/stdout until Exit or end of input

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    stockpile_cli::run()
}
