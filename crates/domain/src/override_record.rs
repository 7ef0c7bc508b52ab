use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tillboard_core::{AppError, BusinessId, PermissionId, PositionId};

/// Polarity of a per-business deviation from a position preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverridePolarity {
    /// Grants a permission the preset does not include.
    Add,
    /// Revokes a permission the preset does include.
    Remove,
}

impl OverridePolarity {
    /// Returns a stable storage value for this polarity.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Remove => "REMOVE",
        }
    }
}

impl FromStr for OverridePolarity {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADD" => Ok(Self::Add),
            "REMOVE" => Ok(Self::Remove),
            _ => Err(AppError::InvalidArgument(format!(
                "unknown override polarity '{value}'"
            ))),
        }
    }
}

/// One per-business, per-position deviation from the preset.
///
/// At most one override exists per `(business, position, permission)` key;
/// writing a new record for an existing key replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverride {
    /// Owning business.
    pub business_id: BusinessId,
    /// Position the deviation applies to.
    pub position_id: PositionId,
    /// Permission the deviation names.
    pub permission_id: PermissionId,
    /// Grant or revoke.
    pub polarity: OverridePolarity,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use tillboard_core::AppError;

    use super::OverridePolarity;

    #[test]
    fn polarity_roundtrip_storage_value() {
        for polarity in [OverridePolarity::Add, OverridePolarity::Remove] {
            let restored = OverridePolarity::from_str(polarity.as_str());
            assert_eq!(restored.ok(), Some(polarity));
        }
    }

    #[test]
    fn unknown_polarity_is_rejected() {
        let parsed = OverridePolarity::from_str("TOGGLE");
        assert!(matches!(parsed, Err(AppError::InvalidArgument(_))));
    }
}
