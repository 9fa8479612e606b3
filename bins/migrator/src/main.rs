//! Database migration runner for Conveyor.
//!
//! Usage:
//!   migrator          - Apply all pending migrations
//!   migrator down     - Roll back the last applied migration
//!
//! Any argument other than the literal `down` (including none) selects the
//! forward direction. The process exits 0 on success and 1 on any failure.

mod runner;

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conveyor_db::migration::Direction;
use conveyor_shared::{AppConfig, AppError};

use crate::runner::{DatabaseMigrationRunner, failure_line, run_and_report};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing. The default filter keeps the outcome line as the
    // only console output; RUST_LOG opts into diagnostics.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let direction = Direction::from_arg(args.get(1).map(String::as_str));

    // Load configuration; a failure here is reported the same way as a
    // failure from the runner itself.
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", failure_line(direction, &AppError::from(err)));
            return ExitCode::FAILURE;
        }
    };

    let migration_runner = DatabaseMigrationRunner::new(config.database);
    match run_and_report(&migration_runner, direction).await {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(line) => {
            eprintln!("{line}");
            ExitCode::FAILURE
        }
    }
}
