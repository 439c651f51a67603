//! Route definitions for the comments domain API

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::comments;
use super::middleware::CommentsState;

/// Create all comments domain API routes
pub fn routes() -> Router<CommentsState> {
    Router::new()
        .route(
            "/tasks/{id}/comments/",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/tasks/{id}/comments/{comment_id}/",
            delete(comments::delete_comment),
        )
}
