//! Auth read-model types
//!
//! Lightweight view of the `users` rows owned by the accounts domain,
//! carrying only what authentication and authorization need.

use chrono::{DateTime, Utc};

/// Identity of an authenticated user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl AuthIdentity {
    /// "first last", trimmed; empty when neither name is set
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
