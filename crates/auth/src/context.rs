//! Authorization context for authenticated users

use crate::types::AuthIdentity;

/// Represents an authenticated user context
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    pub fn new(user: AuthIdentity) -> Self {
        Self { user }
    }

    /// ID of the authenticated user
    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}
