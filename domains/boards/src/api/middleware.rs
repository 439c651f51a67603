//! Boards domain state and auth backend integration

use crate::BoardsRepositories;
use axum::extract::FromRef;
use kanban_auth::AuthBackend;

pub use kanban_auth::AuthUser;

/// Application state for the boards domain
#[derive(Clone)]
pub struct BoardsState {
    pub repos: BoardsRepositories,
    pub auth: AuthBackend,
}

impl FromRef<BoardsState> for AuthBackend {
    fn from_ref(state: &BoardsState) -> Self {
        state.auth.clone()
    }
}
