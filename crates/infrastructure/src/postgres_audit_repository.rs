use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use tillboard_application::{AuditEvent, AuditRepository};
use tillboard_core::{AppError, AppResult};

/// PostgreSQL-backed append-only audit trail.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        debug!(
            business_id = %event.business_id,
            action = event.action.as_str(),
            resource_id = %event.resource_id,
            "appending audit event"
        );

        sqlx::query(
            r#"
            INSERT INTO audit_log (business_id, action, resource_type, resource_id, detail)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.business_id.as_uuid())
        .bind(event.action.as_str())
        .bind(event.resource_type)
        .bind(event.resource_id)
        .bind(event.detail)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

        Ok(())
    }
}
