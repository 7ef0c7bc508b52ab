use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use tillboard_application::PermissionCatalog;
use tillboard_core::{AppError, AppResult, PermissionId, PositionId};
use tillboard_domain::{Permission, Position};

/// PostgreSQL-backed read access to the permission catalog and presets.
#[derive(Clone)]
pub struct PostgresPermissionCatalog {
    pool: PgPool,
}

impl PostgresPermissionCatalog {
    /// Creates a catalog with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: uuid::Uuid,
    feature: String,
    action: String,
}

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Self {
            id: PermissionId::from_uuid(row.id),
            feature: row.feature,
            action: row.action,
        }
    }
}

#[derive(Debug, FromRow)]
struct PositionRow {
    id: uuid::Uuid,
    name: String,
    is_protected: bool,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Self {
            id: PositionId::from_uuid(row.id),
            name: row.name,
            is_protected: row.is_protected,
        }
    }
}

#[async_trait]
impl PermissionCatalog for PostgresPermissionCatalog {
    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, feature, action
            FROM permissions
            ORDER BY feature, action
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?;

        Ok(rows.into_iter().map(Permission::from).collect())
    }

    async fn find_permission(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, feature, action
            FROM permissions
            WHERE id = $1
            "#,
        )
        .bind(permission_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load permission '{permission_id}': {error}"))
        })?;

        Ok(row.map(Permission::from))
    }

    async fn list_positions(&self) -> AppResult<Vec<Position>> {
        let rows = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, name, is_protected
            FROM positions
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list positions: {error}")))?;

        Ok(rows.into_iter().map(Position::from).collect())
    }

    async fn find_position(&self, position_id: PositionId) -> AppResult<Option<Position>> {
        let row = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, name, is_protected
            FROM positions
            WHERE id = $1
            "#,
        )
        .bind(position_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load position '{position_id}': {error}"))
        })?;

        Ok(row.map(Position::from))
    }

    async fn list_preset_permission_ids(
        &self,
        position_id: PositionId,
    ) -> AppResult<BTreeSet<PermissionId>> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM positions WHERE id = $1)
            "#,
        )
        .bind(position_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to check position '{position_id}': {error}"))
        })?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "position '{position_id}' does not exist"
            )));
        }

        let rows = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT permission_id
            FROM position_preset_permissions
            WHERE position_id = $1
            "#,
        )
        .bind(position_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load preset for position '{position_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(PermissionId::from_uuid).collect())
    }
}
