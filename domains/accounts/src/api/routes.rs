//! Route definitions for the accounts domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, users};
use super::middleware::AccountsState;

/// Create all accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .route("/registration/", post(auth::register))
        .route("/login/", post(auth::login))
        .route("/email-check/", get(users::email_check))
}
