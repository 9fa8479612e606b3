//! Migration runner invocation and outcome reporting.

use async_trait::async_trait;

use conveyor_db::migration::Direction;
use conveyor_shared::{AppError, AppResult, DatabaseConfig};

/// The migration-runner collaborator invoked by the entry point.
///
/// The entry point only depends on this seam, so tests can substitute a stub
/// without a database.
#[async_trait]
pub trait MigrationRunner {
    /// Runs migrations in the given direction.
    async fn run(&self, direction: Direction) -> AppResult<()>;
}

/// Production runner backed by the SeaORM migration framework.
pub struct DatabaseMigrationRunner {
    config: DatabaseConfig,
}

impl DatabaseMigrationRunner {
    /// Creates a runner from explicit database configuration.
    #[must_use]
    pub const fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MigrationRunner for DatabaseMigrationRunner {
    async fn run(&self, direction: Direction) -> AppResult<()> {
        let db = conveyor_db::connect(&self.config)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        tracing::info!(%direction, "Connected to database");

        conveyor_db::migration::run(&db, direction)
            .await
            .map_err(|e| AppError::Migration(e.to_string()))
    }
}

/// Invokes the runner and renders the outcome as a console line.
///
/// Returns the success line for stdout, or the failure line for stderr. The
/// failure line names the attempted direction and the error; every failure
/// kind is reported the same way.
pub async fn run_and_report<R: MigrationRunner>(
    runner: &R,
    direction: Direction,
) -> Result<String, String> {
    match runner.run(direction).await {
        Ok(()) => Ok(success_line(direction)),
        Err(err) => Err(failure_line(direction, &err)),
    }
}

/// Renders the single success line for the given direction.
fn success_line(direction: Direction) -> String {
    let verb = match direction {
        Direction::Up => "applied",
        Direction::Down => "rolled back",
    };
    format!("Migrations have been {verb} successfully.")
}

/// Renders the single failure line for the given direction and error.
pub fn failure_line(direction: Direction, err: &AppError) -> String {
    format!("An error occurred while running the {direction} migration: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub collaborator; fails with the given message when set.
    struct StubRunner {
        error: Option<&'static str>,
    }

    #[async_trait]
    impl MigrationRunner for StubRunner {
        async fn run(&self, _direction: Direction) -> AppResult<()> {
            match self.error {
                None => Ok(()),
                Some(msg) => Err(AppError::Migration(msg.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_up_success_line() {
        let runner = StubRunner { error: None };
        let line = run_and_report(&runner, Direction::Up)
            .await
            .expect("run should succeed");
        assert_eq!(line, "Migrations have been applied successfully.");
    }

    #[tokio::test]
    async fn test_down_success_line() {
        let runner = StubRunner { error: None };
        let line = run_and_report(&runner, Direction::Down)
            .await
            .expect("run should succeed");
        assert_eq!(line, "Migrations have been rolled back successfully.");
    }

    #[tokio::test]
    async fn test_failure_line_names_direction_and_error() {
        let runner = StubRunner {
            error: Some("connection refused"),
        };
        let line = run_and_report(&runner, Direction::Up)
            .await
            .expect_err("run should fail");
        assert!(line.contains("up"));
        assert!(line.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_down_failure_line_names_direction() {
        let runner = StubRunner {
            error: Some("relation does not exist"),
        };
        let line = run_and_report(&runner, Direction::Down)
            .await
            .expect_err("run should fail");
        assert!(line.contains("down"));
        assert!(line.contains("relation does not exist"));
    }

    #[test]
    fn test_failure_line_for_config_error() {
        let err = AppError::Config("missing field `url`".to_string());
        let line = failure_line(Direction::Up, &err);
        assert!(line.contains("up"));
        assert!(line.contains("missing field `url`"));
    }
}
