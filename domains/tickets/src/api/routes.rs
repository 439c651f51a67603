//! Route definitions for the tickets domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::tickets;
use super::middleware::TicketsState;

/// Create all tickets domain API routes
pub fn routes() -> Router<TicketsState> {
    Router::new()
        .route("/tasks/", post(tickets::create_ticket))
        .route("/tasks/assigned-to-me/", get(tickets::list_assigned_to_me))
        .route("/tasks/reviewing/", get(tickets::list_reviewing))
        .route(
            "/tasks/{id}/",
            get(tickets::get_ticket)
                .patch(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
}
