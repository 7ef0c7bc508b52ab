use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use tillboard_application::PermissionCatalog;
use tillboard_core::{AppError, AppResult, PermissionId, PositionId};
use tillboard_domain::{Permission, Position};

/// In-memory permission catalog implementation.
///
/// Catalog data is reference data; the seeding methods exist for tests and
/// embedded setups, not for the service layer.
#[derive(Debug, Default)]
pub struct InMemoryPermissionCatalog {
    permissions: RwLock<HashMap<PermissionId, Permission>>,
    positions: RwLock<HashMap<PositionId, Position>>,
    presets: RwLock<HashMap<PositionId, BTreeSet<PermissionId>>>,
}

impl InMemoryPermissionCatalog {
    /// Creates an empty in-memory catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            permissions: RwLock::new(HashMap::new()),
            positions: RwLock::new(HashMap::new()),
            presets: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a catalog permission.
    pub async fn insert_permission(&self, permission: Permission) {
        self.permissions
            .write()
            .await
            .insert(permission.id, permission);
    }

    /// Registers a position template with an empty preset.
    pub async fn insert_position(&self, position: Position) {
        self.presets
            .write()
            .await
            .entry(position.id)
            .or_default();
        self.positions.write().await.insert(position.id, position);
    }

    /// Replaces the preset permission set for a position.
    pub async fn set_preset(&self, position_id: PositionId, preset: BTreeSet<PermissionId>) {
        self.presets.write().await.insert(position_id, preset);
    }
}

#[async_trait]
impl PermissionCatalog for InMemoryPermissionCatalog {
    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        let permissions = self.permissions.read().await;

        let mut values: Vec<Permission> = permissions.values().cloned().collect();
        values.sort_by(Permission::catalog_order);

        Ok(values)
    }

    async fn find_permission(
        &self,
        permission_id: PermissionId,
    ) -> AppResult<Option<Permission>> {
        Ok(self.permissions.read().await.get(&permission_id).cloned())
    }

    async fn list_positions(&self) -> AppResult<Vec<Position>> {
        let positions = self.positions.read().await;

        let mut values: Vec<Position> = positions.values().cloned().collect();
        values.sort_by(|left, right| left.name.cmp(&right.name));

        Ok(values)
    }

    async fn find_position(&self, position_id: PositionId) -> AppResult<Option<Position>> {
        Ok(self.positions.read().await.get(&position_id).cloned())
    }

    async fn list_preset_permission_ids(
        &self,
        position_id: PositionId,
    ) -> AppResult<BTreeSet<PermissionId>> {
        self.presets
            .read()
            .await
            .get(&position_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("position '{position_id}' does not exist")))
    }
}
