//! Per-business customization of position permission presets.

use std::collections::BTreeMap;
use std::sync::Arc;

use tillboard_core::{AppError, AppResult, BusinessId, PermissionId, PositionId};
use tillboard_domain::{
    OverridePolarity, Permission, PermissionSource, Position, ResolutionAnomaly, resolve_effective,
};

use crate::permission_ports::{AuditRepository, OverrideStore, PermissionCatalog};

mod directory;
mod mutate;
mod read;

/// Directory row: one position annotated with a business's customization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSummary {
    /// Position identifier.
    pub position_id: PositionId,
    /// Position display name.
    pub name: String,
    /// Whether override mutations are rejected for this position.
    pub is_protected: bool,
    /// Whether at least one override exists for this business.
    pub is_customized: bool,
    /// Number of `ADD` overrides.
    pub add_count: usize,
    /// Number of `REMOVE` overrides.
    pub remove_count: usize,
}

/// One effective permission with its grant source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermissionEntry {
    /// Catalog permission.
    pub permission: Permission,
    /// Preset grant or per-business `ADD` override.
    pub source: PermissionSource,
}

/// Effective permission set for one `(business, position)` pair.
///
/// Mutations return this directly so callers never need a second round
/// trip to observe the post-mutation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermissions {
    /// Position identifier.
    pub position_id: PositionId,
    /// Position display name.
    pub position_name: String,
    /// Whether override mutations are rejected for this position.
    pub is_protected: bool,
    /// Whether at least one override exists for this business.
    pub is_customized: bool,
    /// Effective permissions in catalog order.
    pub permissions: Vec<EffectivePermissionEntry>,
    /// Preset permissions currently revoked for this business.
    pub removed_from_preset: Vec<Permission>,
    /// Data-integrity findings surfaced for diagnostics.
    pub anomalies: Vec<ResolutionAnomaly>,
}

/// One stored override hydrated with catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideEntry {
    /// Permission named by the override.
    pub permission: Permission,
    /// Grant or revoke.
    pub polarity: OverridePolarity,
}

/// Raw override listing with customization counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideSummary {
    /// Whether at least one override exists.
    pub is_customized: bool,
    /// Number of `ADD` overrides.
    pub add_count: usize,
    /// Number of `REMOVE` overrides.
    pub remove_count: usize,
    /// Stored overrides in catalog order.
    pub overrides: Vec<OverrideEntry>,
}

/// Application service for preset resolution and override mutations.
#[derive(Clone)]
pub struct PositionPermissionService {
    catalog: Arc<dyn PermissionCatalog>,
    overrides: Arc<dyn OverrideStore>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl PositionPermissionService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn PermissionCatalog>,
        overrides: Arc<dyn OverrideStore>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            catalog,
            overrides,
            audit_repository,
        }
    }

    async fn require_position(&self, position_id: PositionId) -> AppResult<Position> {
        self.catalog
            .find_position(position_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("position '{position_id}' does not exist")))
    }

    async fn require_mutable_position(&self, position_id: PositionId) -> AppResult<Position> {
        let position = self.require_position(position_id).await?;
        if position.is_protected {
            return Err(AppError::ProtectedPosition(format!(
                "permissions of position '{}' cannot be overridden",
                position.name
            )));
        }

        Ok(position)
    }

    async fn require_permission(&self, permission_id: PermissionId) -> AppResult<Permission> {
        self.catalog
            .find_permission(permission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("permission '{permission_id}' does not exist"))
            })
    }

    async fn catalog_by_id(&self) -> AppResult<BTreeMap<PermissionId, Permission>> {
        let permissions = self.catalog.list_permissions().await?;
        Ok(permissions
            .into_iter()
            .map(|permission| (permission.id, permission))
            .collect())
    }

    /// Resolves the authoritative effective set for one pair.
    ///
    /// Reads stay total: stored data that no longer matches the catalog is
    /// reported through `anomalies`, never as an error.
    async fn resolve(
        &self,
        business_id: BusinessId,
        position: &Position,
    ) -> AppResult<EffectivePermissions> {
        let preset = self
            .catalog
            .list_preset_permission_ids(position.id)
            .await?;
        let overrides = self
            .overrides
            .list_for_position(business_id, position.id)
            .await?;

        let resolved = resolve_effective(&preset, &overrides);
        let catalog = self.catalog_by_id().await?;

        let mut anomalies = resolved.anomalies.clone();
        let mut permissions: Vec<EffectivePermissionEntry> = Vec::new();
        for (permission_id, source) in &resolved.permissions {
            match catalog.get(permission_id) {
                Some(permission) => permissions.push(EffectivePermissionEntry {
                    permission: permission.clone(),
                    source: *source,
                }),
                None => anomalies.push(ResolutionAnomaly::UnknownPermission {
                    permission_id: *permission_id,
                }),
            }
        }
        permissions.sort_by(|left, right| {
            Permission::catalog_order(&left.permission, &right.permission)
        });

        let mut removed_from_preset: Vec<Permission> = Vec::new();
        for permission_id in &resolved.removed_from_preset {
            match catalog.get(permission_id) {
                Some(permission) => removed_from_preset.push(permission.clone()),
                None => anomalies.push(ResolutionAnomaly::UnknownPermission {
                    permission_id: *permission_id,
                }),
            }
        }
        removed_from_preset.sort_by(Permission::catalog_order);

        Ok(EffectivePermissions {
            position_id: position.id,
            position_name: position.name.clone(),
            is_protected: position.is_protected,
            is_customized: resolved.is_customized,
            permissions,
            removed_from_preset,
            anomalies,
        })
    }
}
