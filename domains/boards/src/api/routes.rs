//! Route definitions for the boards domain API

use axum::{routing::get, Router};

use super::handlers::boards;
use super::middleware::BoardsState;

/// Create all boards domain API routes
pub fn routes() -> Router<BoardsState> {
    Router::new()
        .route(
            "/boards/",
            get(boards::list_boards).post(boards::create_board),
        )
        .route(
            "/boards/{id}/",
            get(boards::get_board)
                .patch(boards::update_board)
                .delete(boards::delete_board),
        )
}
