use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tillboard_core::PermissionId;

/// One addressable capability in the catalog.
///
/// Permissions are immutable reference data; the resolution engine never
/// creates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Stable catalog identifier.
    pub id: PermissionId,
    /// Feature group name, e.g. `sales`.
    pub feature: String,
    /// Action verb name, e.g. `create`.
    pub action: String,
}

impl Permission {
    /// Returns the conventional `feature:action` display key.
    #[must_use]
    pub fn display_key(&self) -> String {
        format!("{}:{}", self.feature, self.action)
    }

    /// Catalog ordering: by feature, then action.
    #[must_use]
    pub fn catalog_order(left: &Self, right: &Self) -> Ordering {
        left.feature
            .cmp(&right.feature)
            .then_with(|| left.action.cmp(&right.action))
    }
}

#[cfg(test)]
mod tests {
    use tillboard_core::PermissionId;

    use super::Permission;

    fn permission(feature: &str, action: &str) -> Permission {
        Permission {
            id: PermissionId::new(),
            feature: feature.to_owned(),
            action: action.to_owned(),
        }
    }

    #[test]
    fn display_key_joins_feature_and_action() {
        assert_eq!(permission("sales", "create").display_key(), "sales:create");
    }

    #[test]
    fn catalog_order_sorts_by_feature_then_action() {
        let mut permissions = vec![
            permission("sales", "read"),
            permission("inventory", "read"),
            permission("sales", "create"),
        ];
        permissions.sort_by(Permission::catalog_order);

        let keys: Vec<String> = permissions.iter().map(Permission::display_key).collect();
        assert_eq!(keys, ["inventory:read", "sales:create", "sales:read"]);
    }
}
