use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by override mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a permission is granted beyond the preset.
    OverrideAdded,
    /// Emitted when a preset permission is revoked or an extra grant undone.
    OverrideRemoved,
    /// Emitted when an override is restored to preset behavior.
    OverrideRestored,
    /// Emitted when all overrides for a position are reset.
    OverridesReset,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OverrideAdded => "permission.override.added",
            Self::OverrideRemoved => "permission.override.removed",
            Self::OverrideRestored => "permission.override.restored",
            Self::OverridesReset => "permission.override.reset",
        }
    }
}
