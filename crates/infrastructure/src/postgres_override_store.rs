use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use tillboard_application::OverrideStore;
use tillboard_core::{AppError, AppResult, BusinessId, PermissionId, PositionId};
use tillboard_domain::{OverridePolarity, PermissionOverride};

/// PostgreSQL-backed override store.
///
/// The `(business_id, position_id, permission_id)` primary key makes every
/// upsert and delete a single-row atomic statement; concurrent mutations on
/// the same key are linearized by the database.
#[derive(Clone)]
pub struct PostgresOverrideStore {
    pool: PgPool,
}

impl PostgresOverrideStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OverrideRow {
    permission_id: uuid::Uuid,
    polarity: String,
}

fn decode_row(
    business_id: BusinessId,
    position_id: PositionId,
    row: OverrideRow,
) -> AppResult<PermissionOverride> {
    let polarity = OverridePolarity::from_str(row.polarity.as_str()).map_err(|error| {
        AppError::Internal(format!(
            "failed to decode override polarity '{}' for business '{business_id}': {error}",
            row.polarity
        ))
    })?;

    Ok(PermissionOverride {
        business_id,
        position_id,
        permission_id: PermissionId::from_uuid(row.permission_id),
        polarity,
    })
}

#[async_trait]
impl OverrideStore for PostgresOverrideStore {
    async fn list_for_position(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<Vec<PermissionOverride>> {
        let rows = sqlx::query_as::<_, OverrideRow>(
            r#"
            SELECT permission_id, polarity
            FROM permission_overrides
            WHERE business_id = $1 AND position_id = $2
            "#,
        )
        .bind(business_id.as_uuid())
        .bind(position_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list overrides: {error}")))?;

        rows.into_iter()
            .map(|row| decode_row(business_id, position_id, row))
            .collect()
    }

    async fn find(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
    ) -> AppResult<Option<PermissionOverride>> {
        let row = sqlx::query_as::<_, OverrideRow>(
            r#"
            SELECT permission_id, polarity
            FROM permission_overrides
            WHERE business_id = $1 AND position_id = $2 AND permission_id = $3
            "#,
        )
        .bind(business_id.as_uuid())
        .bind(position_id.as_uuid())
        .bind(permission_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load override: {error}")))?;

        row.map(|row| decode_row(business_id, position_id, row))
            .transpose()
    }

    async fn upsert(&self, record: PermissionOverride) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO permission_overrides (business_id, position_id, permission_id, polarity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (business_id, position_id, permission_id)
                DO UPDATE SET polarity = EXCLUDED.polarity, updated_at = NOW()
            "#,
        )
        .bind(record.business_id.as_uuid())
        .bind(record.position_id.as_uuid())
        .bind(record.permission_id.as_uuid())
        .bind(record.polarity.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to upsert override: {error}")))?;

        Ok(())
    }

    async fn delete(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM permission_overrides
            WHERE business_id = $1 AND position_id = $2 AND permission_id = $3
            "#,
        )
        .bind(business_id.as_uuid())
        .bind(position_id.as_uuid())
        .bind(permission_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete override: {error}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_position(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM permission_overrides
            WHERE business_id = $1 AND position_id = $2
            "#,
        )
        .bind(business_id.as_uuid())
        .bind(position_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to reset overrides: {error}")))?;

        Ok(result.rows_affected())
    }
}
