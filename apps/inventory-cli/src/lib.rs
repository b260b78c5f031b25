//! # Inventory CLI Library
//!
//! Command-line admin panel for suppliers, products, customers and orders.
//!
//! ## Module Organization
//! ```text
//! inventory_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (env + flags)
//! │   └── nav.rs      ◄─── Menu / Page navigation state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Menu enum & dispatch
//! │   ├── supplier.rs
//! │   ├── product.rs
//! │   ├── customer.rs
//! │   └── order.rs
//! ├── render.rs       ◄─── Tables and JSON
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::Command;
use error::{AppError, AppResult};
use inventory_db::Database;
use render::OutputFormat;
use state::AppConfig;

/// Inventory Management System
#[derive(Parser, Debug)]
#[command(name = "inventory", version)]
#[command(about = "Inventory Management System: suppliers, products, customers and orders")]
pub struct Cli {
    /// Database file (overrides INVENTORY_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Runs the CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • clap; usage errors exit 2 before anything else runs               │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: WARN, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  3. Resolve Configuration ────────────────────────────────────────────► │
/// │     • --db flag, then INVENTORY_* variables, then defaults              │
/// │                                                                         │
/// │  4. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, foreign keys on                             │
/// │     • Create missing tables                                             │
/// │                                                                         │
/// │  5. Dispatch & Render ────────────────────────────────────────────────► │
/// │     • One service call, then the page's table                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let format = cli.output_format();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run_cli(cli, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, format);
            ExitCode::from(err.code.exit_code())
        }
    }
}

/// Resolves configuration, connects, and runs one command.
pub async fn run_cli<W>(cli: Cli, out: &mut W) -> AppResult<()>
where
    W: Write + ?Sized,
{
    let config = AppConfig::from_env()?.with_database_path(cli.db.clone());
    let db_config = config.db_config()?;
    info!(path = ?db_config.database_path, "Opening database");

    let db = Database::new(db_config).await?;
    debug!("Database connected and schema ensured");

    let format = cli.output_format();
    let result = commands::dispatch(&db, cli.command, format, out).await;

    db.close().await;
    result
}

/// Prints a failed command's error to stderr.
fn report(err: &AppError, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(err) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("error[{}]: {}", err.code.as_str(), err.message),
        },
        OutputFormat::Table => eprintln!("error[{}]: {}", err.code.as_str(), err.message),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=inventory=debug` - Debug for the inventory crates only
/// - Default: WARN, so table output is not interleaved with logs
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sqlx=error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
