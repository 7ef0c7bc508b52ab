use std::collections::BTreeSet;

use tillboard_domain::available_to_add;

use super::*;

impl PositionPermissionService {
    /// Returns the effective permission set for one pair.
    pub async fn effective_permissions(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<EffectivePermissions> {
        let position = self.require_position(position_id).await?;
        self.resolve(business_id, &position).await
    }

    /// Returns the full permission catalog in stable order.
    pub async fn list_catalog(&self) -> AppResult<Vec<Permission>> {
        self.catalog.list_permissions().await
    }

    /// Returns all position templates in stable name order.
    pub async fn list_position_templates(&self) -> AppResult<Vec<Position>> {
        self.catalog.list_positions().await
    }

    /// Returns the preset permissions for a position, identical across all
    /// businesses.
    pub async fn preset_permissions(&self, position_id: PositionId) -> AppResult<Vec<Permission>> {
        self.require_position(position_id).await?;

        let preset = self.catalog.list_preset_permission_ids(position_id).await?;
        let catalog = self.catalog_by_id().await?;

        let mut permissions: Vec<Permission> = preset
            .iter()
            .filter_map(|permission_id| catalog.get(permission_id).cloned())
            .collect();
        permissions.sort_by(Permission::catalog_order);

        Ok(permissions)
    }

    /// Returns permissions eligible for a fresh `ADD` override.
    ///
    /// Preset permissions are excluded even when currently revoked; adding
    /// one of those back is a restore.
    pub async fn available_permissions(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<Vec<Permission>> {
        self.require_position(position_id).await?;

        let catalog = self.catalog.list_permissions().await?;
        let preset = self.catalog.list_preset_permission_ids(position_id).await?;
        let overrides = self
            .overrides
            .list_for_position(business_id, position_id)
            .await?;

        let catalog_ids: BTreeSet<_> = catalog.iter().map(|permission| permission.id).collect();
        let add_set: BTreeSet<_> = overrides
            .iter()
            .filter(|record| record.polarity == OverridePolarity::Add)
            .map(|record| record.permission_id)
            .collect();

        let eligible = available_to_add(&catalog_ids, &preset, &add_set);
        Ok(catalog
            .into_iter()
            .filter(|permission| eligible.contains(&permission.id))
            .collect())
    }

    /// Lists the raw overrides for one pair with customization counts.
    pub async fn list_overrides(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<OverrideSummary> {
        self.require_position(position_id).await?;

        let overrides = self
            .overrides
            .list_for_position(business_id, position_id)
            .await?;
        let catalog = self.catalog_by_id().await?;

        let add_count = overrides
            .iter()
            .filter(|record| record.polarity == OverridePolarity::Add)
            .count();
        let remove_count = overrides.len() - add_count;

        let mut entries: Vec<OverrideEntry> = overrides
            .iter()
            .filter_map(|record| {
                catalog.get(&record.permission_id).map(|permission| OverrideEntry {
                    permission: permission.clone(),
                    polarity: record.polarity,
                })
            })
            .collect();
        entries.sort_by(|left, right| {
            Permission::catalog_order(&left.permission, &right.permission)
        });

        Ok(OverrideSummary {
            is_customized: !overrides.is_empty(),
            add_count,
            remove_count,
            overrides: entries,
        })
    }
}
