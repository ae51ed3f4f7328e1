//! Secondhand user API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch};
use secondhand_application::UserService;
use secondhand_core::AppError;
use secondhand_infrastructure::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let user_repository = Arc::new(PostgresUserRepository::new(pool));
    let app_state = AppState {
        user_service: UserService::new(user_repository),
    };

    // Item routes share the `{key}` parameter name because the router
    // requires one name per position; mail-keyed and id-keyed handlers
    // extract it as String or i64 respectively.
    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/v1/user",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/v1/user/{key}",
            get(handlers::users::get_user_by_mail_handler)
                .put(handlers::users::update_user_handler)
                .delete(handlers::users::delete_user_handler),
        )
        .route(
            "/v1/user/{key}/deactivate",
            patch(handlers::users::deactivate_user_handler),
        )
        .route(
            "/v1/user/{key}/activate",
            patch(handlers::users::activate_user_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "secondhand-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
