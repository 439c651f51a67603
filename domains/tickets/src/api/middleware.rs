//! Tickets domain state and auth backend integration

use crate::TicketsRepositories;
use axum::extract::FromRef;
use kanban_auth::AuthBackend;

pub use kanban_auth::AuthUser;

/// Application state for the tickets domain
#[derive(Clone)]
pub struct TicketsState {
    pub repos: TicketsRepositories,
    pub auth: AuthBackend,
}

impl FromRef<TicketsState> for AuthBackend {
    fn from_ref(state: &TicketsState) -> Self {
        state.auth.clone()
    }
}
