use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use tillboard_core::{AppError, AppResult};

const DEV_SEED_BUSINESS_ID: &str = "11111111-1111-1111-1111-111111111111";
const DEV_SEED_BUSINESS_NAME: &str = "Harbor Light Coffee";

/// Catalog of `(feature, action)` permissions seeded for local development.
const DEV_SEED_PERMISSIONS: &[(&str, &str)] = &[
    ("sales", "create"),
    ("sales", "read"),
    ("sales", "refund"),
    ("inventory", "read"),
    ("inventory", "update"),
    ("inventory", "adjust"),
    ("reports", "read"),
    ("reports", "export"),
    ("staff", "read"),
    ("staff", "manage"),
    ("settings", "read"),
    ("settings", "update"),
];

/// Position templates with their preset permission keys. `Owner` is
/// protected and always holds the full catalog.
const DEV_SEED_POSITIONS: &[(&str, bool, &[&str])] = &[
    (
        "Owner",
        true,
        &[
            "sales:create",
            "sales:read",
            "sales:refund",
            "inventory:read",
            "inventory:update",
            "inventory:adjust",
            "reports:read",
            "reports:export",
            "staff:read",
            "staff:manage",
            "settings:read",
            "settings:update",
        ],
    ),
    (
        "Manager",
        false,
        &[
            "sales:create",
            "sales:read",
            "sales:refund",
            "inventory:read",
            "inventory:update",
            "reports:read",
            "staff:read",
        ],
    ),
    (
        "Cashier",
        false,
        &["sales:create", "sales:read", "inventory:read"],
    ),
];

pub async fn run(pool: &PgPool) -> AppResult<()> {
    ensure_business(pool).await?;

    for (feature, action) in DEV_SEED_PERMISSIONS {
        ensure_permission(pool, feature, action).await?;
    }

    for (name, is_protected, preset) in DEV_SEED_POSITIONS {
        let position_id = ensure_position(pool, name, *is_protected).await?;
        for permission_key in *preset {
            ensure_preset_member(pool, position_id, permission_key).await?;
        }
    }

    info!(
        business_name = DEV_SEED_BUSINESS_NAME,
        "development seed completed"
    );

    Ok(())
}

/// Deterministic seed ids so reruns upsert instead of duplicating rows.
fn seed_uuid(kind: &str, name: &str) -> Uuid {
    Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("tillboard:{kind}:{name}").as_bytes(),
    )
}

async fn ensure_business(pool: &PgPool) -> AppResult<()> {
    let business_id = Uuid::parse_str(DEV_SEED_BUSINESS_ID).map_err(|error| {
        AppError::Internal(format!(
            "invalid static dev seed business id '{DEV_SEED_BUSINESS_ID}': {error}"
        ))
    })?;

    sqlx::query(
        r#"
        INSERT INTO businesses (id, name)
        VALUES ($1, $2)
        ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
        "#,
    )
    .bind(business_id)
    .bind(DEV_SEED_BUSINESS_NAME)
    .execute(pool)
    .await
    .map_err(|error| AppError::Internal(format!("failed to seed dev business: {error}")))?;

    Ok(())
}

async fn ensure_permission(pool: &PgPool, feature: &str, action: &str) -> AppResult<()> {
    let permission_id = seed_uuid("permission", format!("{feature}:{action}").as_str());

    sqlx::query(
        r#"
        INSERT INTO permissions (id, feature, action)
        VALUES ($1, $2, $3)
        ON CONFLICT (feature, action) DO NOTHING
        "#,
    )
    .bind(permission_id)
    .bind(feature)
    .bind(action)
    .execute(pool)
    .await
    .map_err(|error| {
        AppError::Internal(format!(
            "failed to seed permission '{feature}:{action}': {error}"
        ))
    })?;

    Ok(())
}

async fn ensure_position(pool: &PgPool, name: &str, is_protected: bool) -> AppResult<Uuid> {
    let position_id = seed_uuid("position", name);

    sqlx::query(
        r#"
        INSERT INTO positions (id, name, is_protected)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO UPDATE SET is_protected = EXCLUDED.is_protected
        "#,
    )
    .bind(position_id)
    .bind(name)
    .bind(is_protected)
    .execute(pool)
    .await
    .map_err(|error| AppError::Internal(format!("failed to seed position '{name}': {error}")))?;

    let row: (Uuid,) = sqlx::query_as("SELECT id FROM positions WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load seeded position '{name}': {error}"))
        })?;

    Ok(row.0)
}

async fn ensure_preset_member(
    pool: &PgPool,
    position_id: Uuid,
    permission_key: &str,
) -> AppResult<()> {
    let Some((feature, action)) = permission_key.split_once(':') else {
        return Err(AppError::Internal(format!(
            "invalid static seed permission key '{permission_key}'"
        )));
    };

    sqlx::query(
        r#"
        INSERT INTO position_preset_permissions (position_id, permission_id)
        SELECT $1, id FROM permissions WHERE feature = $2 AND action = $3
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(position_id)
    .bind(feature)
    .bind(action)
    .execute(pool)
    .await
    .map_err(|error| {
        AppError::Internal(format!(
            "failed to seed preset permission '{permission_key}': {error}"
        ))
    })?;

    Ok(())
}
