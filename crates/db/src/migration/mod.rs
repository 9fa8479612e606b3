//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. Ordering, transactional
//! apply, and the applied-migration history (`seaql_migrations` table) are
//! owned by the framework; this module only declares the migrations and
//! dispatches a run in the requested direction.

pub use sea_orm_migration::prelude::*;

use std::fmt;

use sea_orm::DatabaseConnection;

mod m20260801_000001_initial;
mod m20260805_000002_delivery_attempts;

/// Direction of a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply all pending migrations.
    Up,
    /// Roll back the most recently applied migration.
    Down,
}

impl Direction {
    /// Resolves the direction from the raw command-line argument.
    ///
    /// Only the literal string `"down"` selects [`Direction::Down`]; any
    /// other value, including a missing argument, selects [`Direction::Up`].
    #[must_use]
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("down") => Self::Down,
            _ => Self::Up,
        }
    }

    /// Returns the lowercase name of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_initial::Migration),
            Box::new(m20260805_000002_delivery_attempts::Migration),
        ]
    }
}

/// Runs migrations in the given direction.
///
/// `Up` applies every pending migration. `Down` rolls back the most recently
/// applied migration (one step).
///
/// # Errors
///
/// Returns an error if the migration framework fails to apply or roll back.
pub async fn run(db: &DatabaseConnection, direction: Direction) -> Result<(), DbErr> {
    match direction {
        Direction::Up => {
            tracing::info!("Applying pending migrations");
            Migrator::up(db, None).await
        }
        Direction::Down => {
            tracing::info!("Rolling back last applied migration");
            Migrator::down(db, Some(1)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_down_only_for_exact_literal() {
        assert_eq!(Direction::from_arg(Some("down")), Direction::Down);
        assert_eq!(Direction::from_arg(Some("up")), Direction::Up);
        assert_eq!(Direction::from_arg(Some("DOWN")), Direction::Up);
        assert_eq!(Direction::from_arg(Some("rollback")), Direction::Up);
        assert_eq!(Direction::from_arg(Some("")), Direction::Up);
        assert_eq!(Direction::from_arg(None), Direction::Up);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn test_migrations_are_chronological() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert!(!names.is_empty());

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
