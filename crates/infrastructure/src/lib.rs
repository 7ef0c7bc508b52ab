//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_override_store;
mod in_memory_permission_catalog;
mod postgres_audit_repository;
mod postgres_override_store;
mod postgres_permission_catalog;

pub use in_memory_override_store::InMemoryOverrideStore;
pub use in_memory_permission_catalog::InMemoryPermissionCatalog;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_override_store::PostgresOverrideStore;
pub use postgres_permission_catalog::PostgresPermissionCatalog;
