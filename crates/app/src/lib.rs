//! Kanban application composition root
//!
//! Composes all domain routers into a single application and provides the
//! HTTP layers shared by every binary.

use axum::{http::HeaderValue, routing::get, Json, Router};
use kanban_accounts::{AccountsRepositories, AccountsState};
use kanban_auth::{AuthBackend, AuthConfig};
use kanban_boards::{BoardsRepositories, BoardsState};
use kanban_comments::{CommentsRepositories, CommentsState};
use kanban_common::Config;
use kanban_tickets::{TicketsRepositories, TicketsState};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

/// Maximum accepted request body (1 MiB)
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all domain routes
pub fn create_app(config: &Config, pool: PgPool) -> Router {
    let auth = AuthBackend::new(pool.clone(), AuthConfig::from(config));

    let accounts_state = AccountsState {
        repos: AccountsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };
    let boards_state = BoardsState {
        repos: BoardsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };
    let tickets_state = TicketsState {
        repos: TicketsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };
    let comments_state = CommentsState {
        repos: CommentsRepositories::new(pool),
        auth,
    };

    Router::new()
        .route("/health", get(health_check))
        .merge(kanban_accounts::routes().with_state(accounts_state))
        .merge(kanban_boards::routes().with_state(boards_state))
        .merge(kanban_tickets::routes().with_state(tickets_state))
        .merge(kanban_comments::routes().with_state(comments_state))
}

/// Run pending database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// CORS layer for the configured origins.
///
/// `None` allows any origin. Origins that are not valid header values are
/// skipped with a warning.
#[mutants::skip] // CorsLayer exposes no state to assert on
pub fn build_cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let Some(origins) = allowed_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
