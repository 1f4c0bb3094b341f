//! # Configuration
//!
//! Command-line flags and application configuration.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--config`, `--log`, `-v`)
//! 2. Environment variables (`STOCKPILE_*`, read by clap)
//! 3. Config file (JSON, from `--config` or `STOCKPILE_CONFIG`)
//! 4. Defaults (this file)
//!
//! `RUST_LOG`, when set, replaces the resolved log filter entirely.
//!
//! ## Example Config File
//! ```json
//! {
//!   "database_path": "/srv/stock/inventory.db",
//!   "log_filter": "warn,stockpile=debug",
//!   "max_connections": 2,
//!   "currency_symbol": "€"
//! }
//! ```

use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliError;

pub const ENV_DB_PATH: &str = "STOCKPILE_DB_PATH";
pub const ENV_CONFIG: &str = "STOCKPILE_CONFIG";
pub const ENV_LOG: &str = "STOCKPILE_LOG";

pub const DEFAULT_LOG_FILTER: &str = "warn,stockpile=info,sqlx=warn";
pub const VERBOSE_LOG_FILTER: &str = "info,stockpile=debug,sqlx=warn";

const DATABASE_FILE: &str = "inventory.db";

// =============================================================================
// Command-line Flags
// =============================================================================

/// Stockpile: inventory management from the terminal.
///
/// Flags win over their environment variables; both win over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "stockpile", version)]
#[command(about = "Track suppliers, warehouses, products and orders in a local SQLite file")]
#[command(after_help = "RUST_LOG, when set, overrides every other log setting.")]
pub struct CliArgs {
    /// Database file path (default: platform data dir)
    #[arg(short = 'd', long = "db", env = ENV_DB_PATH, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// JSON config file
    #[arg(short = 'c', long = "config", env = ENV_CONFIG, value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Log filter directives (e.g. warn,stockpile=debug)
    #[arg(long = "log", env = ENV_LOG, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

// =============================================================================
// Application Config
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file; `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// `tracing` filter directives.
    pub log_filter: String,

    /// Pool size.
    pub max_connections: u32,

    /// Symbol used when printing prices.
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_connections: 5,
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&text).map_err(|e| {
            CliError::config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Layers parsed flags (already merged with their environment
    /// variables) over the config file and defaults.
    pub fn resolve(args: &CliArgs) -> Result<Self, CliError> {
        let mut config = match &args.config_path {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(filter) = &args.log_filter {
            config.log_filter = filter.clone();
        }
        if let Some(path) = &args.db_path {
            config.database_path = Some(path.clone());
        }
        if args.verbose {
            config.log_filter = VERBOSE_LOG_FILTER.to_string();
        }

        if config.max_connections == 0 {
            return Err(CliError::config("max_connections must be at least 1"));
        }

        Ok(config)
    }

    /// The database file to open, creating the default data directory when
    /// no path was configured.
    pub fn database_path(&self) -> Result<PathBuf, CliError> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_database_path(),
        }
    }
}

/// Platform data directory:
/// - **Linux**: `~/.local/share/inventory/inventory.db`
/// - **macOS**: `~/Library/Application Support/com.stockpile.inventory/inventory.db`
/// - **Windows**: `%APPDATA%\stockpile\inventory\data\inventory.db`
fn default_database_path() -> Result<PathBuf, CliError> {
    let proj_dirs = ProjectDirs::from("com", "stockpile", "inventory")
        .ok_or_else(|| CliError::config("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join(DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn args(list: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("stockpile").chain(list.iter().copied()))
    }

    fn temp_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "stockpile-config-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_command_definition() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_flags_read_their_environment_variables() {
        let command = CliArgs::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|name| name.to_string_lossy().to_string())
        };

        assert_eq!(env_of("db_path").as_deref(), Some(ENV_DB_PATH));
        assert_eq!(env_of("config_path").as_deref(), Some(ENV_CONFIG));
        assert_eq!(env_of("log_filter").as_deref(), Some(ENV_LOG));
        assert_eq!(env_of("verbose"), None);
    }

    #[test]
    fn test_parse_flags() {
        let parsed = args(&["--db", "x.db", "-v", "-c", "cfg.json", "--log", "debug"]).unwrap();
        assert_eq!(parsed.db_path, Some(PathBuf::from("x.db")));
        assert_eq!(parsed.config_path, Some(PathBuf::from("cfg.json")));
        assert_eq!(parsed.log_filter.as_deref(), Some("debug"));
        assert!(parsed.verbose);

        assert_eq!(args(&["-d", "y.db"]).unwrap().db_path, Some(PathBuf::from("y.db")));
    }

    #[test]
    fn test_parse_rejects_bad_flags() {
        use clap::error::ErrorKind;

        assert_eq!(args(&["--frobnicate"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert!(args(&["--db"]).is_err());
        assert_eq!(args(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve(&CliArgs::default()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_priority_flags_over_file() {
        let file = temp_config(
            "priority",
            r#"{ "database_path": "file.db", "log_filter": "error", "currency_symbol": "€" }"#,
        );

        let from_file = AppConfig::resolve(&CliArgs {
            config_path: Some(file.clone()),
            ..CliArgs::default()
        })
        .unwrap();
        assert_eq!(from_file.database_path, Some(PathBuf::from("file.db")));
        assert_eq!(from_file.log_filter, "error");
        assert_eq!(from_file.currency_symbol, "€");
        assert_eq!(from_file.max_connections, 5);

        let from_flags = AppConfig::resolve(&CliArgs {
            config_path: Some(file.clone()),
            db_path: Some(PathBuf::from("flag.db")),
            log_filter: Some("warn".to_string()),
            verbose: false,
        })
        .unwrap();
        assert_eq!(from_flags.database_path, Some(PathBuf::from("flag.db")));
        assert_eq!(from_flags.log_filter, "warn");
        assert_eq!(from_flags.currency_symbol, "€");

        let verbose = AppConfig::resolve(&CliArgs {
            config_path: Some(file.clone()),
            log_filter: Some("warn".to_string()),
            verbose: true,
            ..CliArgs::default()
        })
        .unwrap();
        assert_eq!(verbose.log_filter, VERBOSE_LOG_FILTER);

        std::fs::remove_file(file).unwrap();
    }

    #[test]
    fn test_bad_config_file() {
        let missing = CliArgs {
            config_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..CliArgs::default()
        };
        assert!(AppConfig::resolve(&missing).is_err());

        let file = temp_config("broken", "{ not json");
        let broken = CliArgs {
            config_path: Some(file.clone()),
            ..CliArgs::default()
        };
        assert!(AppConfig::resolve(&broken).is_err());
        std::fs::remove_file(file).unwrap();

        let file = temp_config("zero", r#"{ "max_connections": 0 }"#);
        let zero = CliArgs {
            config_path: Some(file.clone()),
            ..CliArgs::default()
        };
        assert!(AppConfig::resolve(&zero).is_err());
        std::fs::remove_file(file).unwrap();
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("here.db")),
            ..AppConfig::default()
        };
        assert_eq!(config.database_path().unwrap(), PathBuf::from("here.db"));
    }
}
