use tillboard_domain::{AuditAction, PermissionOverride};

use crate::AuditEvent;

use super::*;

impl PositionPermissionService {
    /// Puts a permission into the effective set of one pair.
    ///
    /// When the preset grants the permission and a `REMOVE` override is
    /// stored, this undoes the removal instead of storing an `ADD`; when
    /// the preset grants it and no override exists the call fails with
    /// `AlreadyGranted` so the override set stays minimal.
    pub async fn add_override(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
    ) -> AppResult<EffectivePermissions> {
        let position = self.require_mutable_position(position_id).await?;
        let permission = self.require_permission(permission_id).await?;
        let preset = self.catalog.list_preset_permission_ids(position_id).await?;
        let existing = self
            .overrides
            .find(business_id, position_id, permission_id)
            .await?;

        if preset.contains(&permission_id) {
            match existing {
                Some(record) if record.polarity == OverridePolarity::Remove => {
                    self.overrides
                        .delete(business_id, position_id, permission_id)
                        .await?;
                    self.append_override_event(
                        business_id,
                        position_id,
                        permission_id,
                        AuditAction::OverrideRestored,
                        format!("restored preset permission '{}'", permission.display_key()),
                    )
                    .await?;
                }
                _ => {
                    return Err(AppError::AlreadyGranted(format!(
                        "permission '{}' is already part of the preset of position '{}'",
                        permission.display_key(),
                        position.name
                    )));
                }
            }
        } else {
            self.overrides
                .upsert(PermissionOverride {
                    business_id,
                    position_id,
                    permission_id,
                    polarity: OverridePolarity::Add,
                })
                .await?;
            self.append_override_event(
                business_id,
                position_id,
                permission_id,
                AuditAction::OverrideAdded,
                format!("granted extra permission '{}'", permission.display_key()),
            )
            .await?;
        }

        self.resolve(business_id, &position).await
    }

    /// Removes a permission from the effective set of one pair.
    ///
    /// Preset permissions are revoked with a `REMOVE` override; extra
    /// grants are removed by deleting their `ADD` override. Fails with
    /// `NotGranted` when nothing grants the permission.
    pub async fn remove_override(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
    ) -> AppResult<EffectivePermissions> {
        let position = self.require_mutable_position(position_id).await?;
        let permission = self.require_permission(permission_id).await?;
        let preset = self.catalog.list_preset_permission_ids(position_id).await?;

        if preset.contains(&permission_id) {
            self.overrides
                .upsert(PermissionOverride {
                    business_id,
                    position_id,
                    permission_id,
                    polarity: OverridePolarity::Remove,
                })
                .await?;
        } else {
            let existing = self
                .overrides
                .find(business_id, position_id, permission_id)
                .await?;
            match existing {
                Some(record) if record.polarity == OverridePolarity::Add => {
                    self.overrides
                        .delete(business_id, position_id, permission_id)
                        .await?;
                }
                _ => {
                    return Err(AppError::NotGranted(format!(
                        "permission '{}' is not granted to position '{}'",
                        permission.display_key(),
                        position.name
                    )));
                }
            }
        }

        self.append_override_event(
            business_id,
            position_id,
            permission_id,
            AuditAction::OverrideRemoved,
            format!("revoked permission '{}'", permission.display_key()),
        )
        .await?;

        self.resolve(business_id, &position).await
    }

    /// Deletes the override stored for one key regardless of polarity.
    ///
    /// The safe general-purpose inverse: a no-op, not an error, when no
    /// override exists.
    pub async fn restore_override(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
    ) -> AppResult<EffectivePermissions> {
        let position = self.require_mutable_position(position_id).await?;
        let permission = self.require_permission(permission_id).await?;

        let deleted = self
            .overrides
            .delete(business_id, position_id, permission_id)
            .await?;
        if deleted {
            self.append_override_event(
                business_id,
                position_id,
                permission_id,
                AuditAction::OverrideRestored,
                format!(
                    "restored permission '{}' to preset behavior",
                    permission.display_key()
                ),
            )
            .await?;
        }

        self.resolve(business_id, &position).await
    }

    /// Deletes every override for one pair in one atomic batch.
    pub async fn reset_to_preset(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
    ) -> AppResult<EffectivePermissions> {
        let position = self.require_mutable_position(position_id).await?;

        let removed = self
            .overrides
            .delete_for_position(business_id, position_id)
            .await?;
        if removed > 0 {
            self.audit_repository
                .append_event(AuditEvent {
                    business_id,
                    action: AuditAction::OverridesReset,
                    resource_type: "position_override".to_owned(),
                    resource_id: position_id.to_string(),
                    detail: Some(format!(
                        "reset position '{}' to preset, removed {removed} overrides",
                        position.name
                    )),
                })
                .await?;
        }

        self.resolve(business_id, &position).await
    }

    async fn append_override_event(
        &self,
        business_id: BusinessId,
        position_id: PositionId,
        permission_id: PermissionId,
        action: AuditAction,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                business_id,
                action,
                resource_type: "position_override".to_owned(),
                resource_id: format!("{position_id}:{permission_id}"),
                detail: Some(detail),
            })
            .await
    }
}
