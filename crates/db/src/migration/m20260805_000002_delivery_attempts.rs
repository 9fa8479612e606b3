//! Delivery attempts migration.
//!
//! Creates the delivery_attempts table recording every dispatch attempt
//! for a delivery, including the endpoint response.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DELIVERY_ATTEMPTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS delivery_attempts CASCADE;")
            .await?;
        Ok(())
    }
}

const DELIVERY_ATTEMPTS_SQL: &str = r"
-- Delivery attempts table for per-dispatch response tracking
CREATE TABLE delivery_attempts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    delivery_id UUID NOT NULL REFERENCES deliveries(id) ON DELETE CASCADE,
    attempt_number INTEGER NOT NULL,
    response_status SMALLINT,
    response_body TEXT,
    error TEXT,
    latency_ms INTEGER,
    attempted_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_attempts_delivery_number UNIQUE (delivery_id, attempt_number),
    CONSTRAINT chk_attempt_number_positive CHECK (attempt_number > 0)
);

-- Attempt history per delivery (most common operation)
CREATE INDEX idx_attempts_delivery ON delivery_attempts(delivery_id, attempt_number DESC);

-- Failed attempt triage
CREATE INDEX idx_attempts_errors ON delivery_attempts(attempted_at) WHERE error IS NOT NULL;
";
