use serde::{Deserialize, Serialize};
use tillboard_application::{
    EffectivePermissionEntry, EffectivePermissions, OverrideEntry, OverrideSummary,
    PositionSummary,
};
use tillboard_domain::{Permission, PermissionSource, Position, ResolutionAnomaly};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of one catalog permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub permission_id: String,
    pub feature: String,
    pub action: String,
    pub permission_key: String,
}

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        let permission_key = value.display_key();
        Self {
            permission_id: value.id.to_string(),
            feature: value.feature,
            action: value.action,
            permission_key,
        }
    }
}

/// API representation of one position template.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/position-response.ts"
)]
pub struct PositionResponse {
    pub position_id: String,
    pub name: String,
    pub is_protected: bool,
}

impl From<Position> for PositionResponse {
    fn from(value: Position) -> Self {
        Self {
            position_id: value.id.to_string(),
            name: value.name,
            is_protected: value.is_protected,
        }
    }
}

/// Directory row: position with customization summary for one business.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/position-summary-response.ts"
)]
pub struct PositionSummaryResponse {
    pub position_id: String,
    pub name: String,
    pub is_protected: bool,
    pub is_customized: bool,
    pub add_count: usize,
    pub remove_count: usize,
}

impl From<PositionSummary> for PositionSummaryResponse {
    fn from(value: PositionSummary) -> Self {
        Self {
            position_id: value.position_id.to_string(),
            name: value.name,
            is_protected: value.is_protected,
            is_customized: value.is_customized,
            add_count: value.add_count,
            remove_count: value.remove_count,
        }
    }
}

/// One effective permission with its grant source.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/effective-permission-response.ts"
)]
pub struct EffectivePermissionResponse {
    #[serde(flatten)]
    pub permission: PermissionResponse,
    pub source: &'static str,
}

impl From<EffectivePermissionEntry> for EffectivePermissionResponse {
    fn from(value: EffectivePermissionEntry) -> Self {
        Self {
            permission: PermissionResponse::from(value.permission),
            source: match value.source {
                PermissionSource::Preset => "preset",
                PermissionSource::Override => "override",
            },
        }
    }
}

/// Data-integrity finding surfaced for diagnostics.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/resolution-anomaly-response.ts"
)]
pub struct ResolutionAnomalyResponse {
    pub kind: &'static str,
    pub permission_id: String,
}

impl From<ResolutionAnomaly> for ResolutionAnomalyResponse {
    fn from(value: ResolutionAnomaly) -> Self {
        match value {
            ResolutionAnomaly::DuplicateOverride { permission_id } => Self {
                kind: "duplicate_override",
                permission_id: permission_id.to_string(),
            },
            ResolutionAnomaly::RemoveOutsidePreset { permission_id } => Self {
                kind: "remove_outside_preset",
                permission_id: permission_id.to_string(),
            },
            ResolutionAnomaly::AddAlreadyInPreset { permission_id } => Self {
                kind: "add_already_in_preset",
                permission_id: permission_id.to_string(),
            },
            ResolutionAnomaly::UnknownPermission { permission_id } => Self {
                kind: "unknown_permission",
                permission_id: permission_id.to_string(),
            },
        }
    }
}

/// Effective permission set for one `(business, position)` pair.
///
/// Also the response of every override mutation, so clients never refetch
/// to observe the post-mutation state.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/effective-permissions-response.ts"
)]
pub struct EffectivePermissionsResponse {
    pub position_id: String,
    pub position_name: String,
    pub is_protected: bool,
    pub is_customized: bool,
    pub permissions: Vec<EffectivePermissionResponse>,
    pub removed_from_preset: Vec<PermissionResponse>,
    pub anomalies: Vec<ResolutionAnomalyResponse>,
}

impl From<EffectivePermissions> for EffectivePermissionsResponse {
    fn from(value: EffectivePermissions) -> Self {
        Self {
            position_id: value.position_id.to_string(),
            position_name: value.position_name,
            is_protected: value.is_protected,
            is_customized: value.is_customized,
            permissions: value
                .permissions
                .into_iter()
                .map(EffectivePermissionResponse::from)
                .collect(),
            removed_from_preset: value
                .removed_from_preset
                .into_iter()
                .map(PermissionResponse::from)
                .collect(),
            anomalies: value
                .anomalies
                .into_iter()
                .map(ResolutionAnomalyResponse::from)
                .collect(),
        }
    }
}

/// One stored override hydrated with catalog metadata.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/override-response.ts"
)]
pub struct OverrideResponse {
    #[serde(flatten)]
    pub permission: PermissionResponse,
    pub polarity: &'static str,
}

impl From<OverrideEntry> for OverrideResponse {
    fn from(value: OverrideEntry) -> Self {
        Self {
            permission: PermissionResponse::from(value.permission),
            polarity: value.polarity.as_str(),
        }
    }
}

/// Raw override listing with customization counts.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/override-summary-response.ts"
)]
pub struct OverrideSummaryResponse {
    pub is_customized: bool,
    pub add_count: usize,
    pub remove_count: usize,
    pub overrides: Vec<OverrideResponse>,
}

impl From<OverrideSummary> for OverrideSummaryResponse {
    fn from(value: OverrideSummary) -> Self {
        Self {
            is_customized: value.is_customized,
            add_count: value.add_count,
            remove_count: value.remove_count,
            overrides: value
                .overrides
                .into_iter()
                .map(OverrideResponse::from)
                .collect(),
        }
    }
}

/// Incoming payload for granting a permission beyond the preset.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/add-override-request.ts"
)]
pub struct AddOverrideRequest {
    pub permission_id: String,
}
