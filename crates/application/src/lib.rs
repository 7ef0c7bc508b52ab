//! Application services and ports.

#![forbid(unsafe_code)]

mod permission_ports;
mod position_permission_service;

pub use permission_ports::{AuditEvent, AuditRepository, OverrideStore, PermissionCatalog};
pub use position_permission_service::{
    EffectivePermissionEntry, EffectivePermissions, OverrideEntry, OverrideSummary,
    PositionPermissionService, PositionSummary,
};
