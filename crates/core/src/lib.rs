//! Shared primitives for all Rust crates in Tillboard.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Result type used across Tillboard crates.
pub type AppResult<T> = Result<T, AppError>;

/// Business identifier scoping every override record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(Uuid);

impl BusinessId {
    /// Creates a random business identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a business identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BusinessId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for BusinessId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for BusinessId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| AppError::InvalidArgument(format!("'{value}' is not a valid business id")))
    }
}

/// Identifier of a global position template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(Uuid);

impl PositionId {
    /// Creates a random position identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a position identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PositionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PositionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for PositionId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| AppError::InvalidArgument(format!("'{value}' is not a valid position id")))
    }
}

/// Identifier of one addressable permission in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(Uuid);

impl PermissionId {
    /// Creates a random permission identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a permission identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PermissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for PermissionId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self).map_err(|_| {
            AppError::InvalidArgument(format!("'{value}' is not a valid permission id"))
        })
    }
}

/// Common application error categories.
///
/// Every mutator precondition failure gets its own variant so callers can
/// render a specific message and the UI can react to `ProtectedPosition`
/// without string matching.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed identifier or payload, rejected before any store access.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced position or permission does not exist in the catalog.
    #[error("not found: {0}")]
    NotFound(String),

    /// Mutation attempted against the protected position.
    #[error("protected position: {0}")]
    ProtectedPosition(String),

    /// Add requested for a permission the preset already grants.
    #[error("already granted: {0}")]
    AlreadyGranted(String),

    /// Remove requested for a permission nothing currently grants.
    #[error("not granted: {0}")]
    NotGranted(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns a stable machine-readable code for transport payloads.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::ProtectedPosition(_) => "protected_position",
            Self::AlreadyGranted(_) => "already_granted",
            Self::NotGranted(_) => "not_granted",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{AppError, BusinessId, PermissionId};

    #[test]
    fn business_id_formats_as_uuid() {
        let business_id = BusinessId::new();
        assert_eq!(business_id.to_string().len(), 36);
    }

    #[test]
    fn permission_id_roundtrips_through_text() {
        let permission_id = PermissionId::new();
        let parsed = PermissionId::from_str(&permission_id.to_string());
        assert_eq!(parsed.ok(), Some(permission_id));
    }

    #[test]
    fn malformed_identifier_is_invalid_argument() {
        let parsed = BusinessId::from_str("not-a-uuid");
        assert!(matches!(parsed, Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn error_codes_are_distinct() {
        let codes = [
            AppError::InvalidArgument(String::new()).code(),
            AppError::NotFound(String::new()).code(),
            AppError::ProtectedPosition(String::new()).code(),
            AppError::AlreadyGranted(String::new()).code(),
            AppError::NotGranted(String::new()).code(),
            AppError::Conflict(String::new()).code(),
            AppError::Internal(String::new()).code(),
        ];
        let unique: std::collections::BTreeSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
