//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod override_record;
mod permission;
mod position;
mod resolution;

pub use audit::AuditAction;
pub use override_record::{OverridePolarity, PermissionOverride};
pub use permission::Permission;
pub use position::Position;
pub use resolution::{
    EffectiveResolution, PermissionSource, ResolutionAnomaly, available_to_add, resolve_effective,
};
