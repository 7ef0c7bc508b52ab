//! Tillboard API composition root.

#![forbid(unsafe_code)]

mod dev_seed;
mod dto;
mod error;
mod handlers;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post};
use sqlx::postgres::PgPoolOptions;
use tillboard_application::PositionPermissionService;
use tillboard_core::AppError;
use tillboard_infrastructure::{
    PostgresAuditRepository, PostgresOverrideStore, PostgresPermissionCatalog,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

    let database_url = required_env("DATABASE_URL")?;
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);
    let dev_seed_enabled = env::var("DEV_SEED")
        .unwrap_or_else(|_| "false".to_owned())
        .eq_ignore_ascii_case("true");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    if dev_seed_enabled {
        dev_seed::run(&pool).await?;
    }

    let catalog = Arc::new(PostgresPermissionCatalog::new(pool.clone()));
    let override_store = Arc::new(PostgresOverrideStore::new(pool.clone()));
    let audit_repository = Arc::new(PostgresAuditRepository::new(pool.clone()));

    let app_state = AppState {
        position_permission_service: PositionPermissionService::new(
            catalog,
            override_store,
            audit_repository,
        ),
    };

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/permissions",
            get(handlers::permissions::list_permissions_handler),
        )
        .route(
            "/api/positions",
            get(handlers::positions::list_position_templates_handler),
        )
        .route(
            "/api/positions/{position_id}/preset-permissions",
            get(handlers::positions::preset_permissions_handler),
        )
        .route(
            "/api/businesses/{business_id}/positions",
            get(handlers::positions::list_business_positions_handler),
        )
        .route(
            "/api/businesses/{business_id}/positions/{position_id}/effective-permissions",
            get(handlers::positions::effective_permissions_handler),
        )
        .route(
            "/api/businesses/{business_id}/positions/{position_id}/available-permissions",
            get(handlers::positions::available_permissions_handler),
        )
        .route(
            "/api/businesses/{business_id}/positions/{position_id}/overrides",
            get(handlers::positions::list_overrides_handler)
                .post(handlers::positions::add_override_handler)
                .delete(handlers::positions::reset_to_preset_handler),
        )
        .route(
            "/api/businesses/{business_id}/positions/{position_id}/overrides/{permission_id}",
            delete(handlers::positions::remove_override_handler),
        )
        .route(
            "/api/businesses/{business_id}/positions/{position_id}/overrides/{permission_id}/restore",
            post(handlers::positions::restore_override_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    let host = IpAddr::from_str(&api_host)
        .map_err(|error| AppError::Internal(format!("invalid API_HOST '{api_host}': {error}")))?;
    let address = SocketAddr::from((host, api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "tillboard-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::InvalidArgument(format!("{name} is required")))
}
