use serde::{Deserialize, Serialize};
use tillboard_core::PositionId;

/// A named role template shared by all businesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Stable position identifier.
    pub id: PositionId,
    /// Display name, e.g. `Cashier`.
    pub name: String,
    /// Protected positions (e.g. `Owner`) reject every override mutation.
    pub is_protected: bool,
}
