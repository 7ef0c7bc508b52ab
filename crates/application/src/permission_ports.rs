//! Ports consumed by the position permission service.

use std::collections::BTreeSet;

use async_trait::async_trait;

use tillboard_core::{AppResult, BusinessId, PermissionId, PositionId};
use tillboard_domain::{AuditAction, Permission, PermissionOverride, Position};

/// Read-only port over the permission catalog and position presets.
///
/// Catalog data is immutable reference data shared by every business; no
/// method here has side effects.
#[async_trait]
pub trait PermissionCatalog: Send + Sync {
    /// Lists the full catalog in stable `(feature, action)` order.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;

    /// Lists all position templates in stable name order.
    async fn list_positions(&self) -> AppResult<Vec<Position>>;

    /// Finds a single catalog permission by identifier.
    async fn find_permission(&self, permission_id: PermissionId)
    -> AppResult<Option<Permission>>;

    /// Finds a position by identifier.
    async fn find_position(&self, position_id: PositionId) -> AppResult<Option<Position>>;

    /// Lists the preset permission ids for a position.
    ///
    /// Fails with `NotFound` when the position does not exist.
    async fn list_preset_permission_ids(
        &self,
        position_id: PositionId,
    ) -> AppResult<BTreeSet<PermissionId>>;
}

/// Write-side port over per-business override records.
///
/// Implementations guarantee per-key atomicity: at most one record per
/// `(business, position, permission)` key, upsert and delete each applied
/// in a single transaction.
#[async_trait]
pub trait OverrideStore: Send + Sync {
    /// Lists overrides for one `(business, position)` pair.
    async fn list_for_position(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<Vec<PermissionOverride>>;

    /// Finds the override stored for one key, if any.
    async fn find(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
    ) -> AppResult<Option<PermissionOverride>>;

    /// Inserts or replaces the override for its key.
    async fn upsert(&self, record: PermissionOverride) -> AppResult<()>;

    /// Deletes the override for one key; returns whether a record existed.
    async fn delete(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
    ) -> AppResult<bool>;

    /// Deletes every override for one `(business, position)` pair in one
    /// atomic batch; returns the number of records removed.
    async fn delete_for_position(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<u64>;
}

/// Structured audit event emitted after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Business the mutation was scoped to.
    pub business_id: BusinessId,
    /// Stable action identifier.
    pub action: AuditAction,
    /// Event resource type.
    pub resource_type: String,
    /// Event resource identifier.
    pub resource_id: String,
    /// Optional event detail.
    pub detail: Option<String>,
}

/// Repository port for the append-only audit trail.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
