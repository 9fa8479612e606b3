//! Database layer for Conveyor.
//!
//! This crate provides:
//! - The database connection helper
//! - Database migrations and the migration runner

pub mod migration;

use conveyor_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// Pool sizing comes from the explicit configuration passed in, not from
/// ambient process state.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.as_str());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);
    Database::connect(options).await
}
