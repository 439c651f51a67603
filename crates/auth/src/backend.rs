//! Concrete authentication backend
//!
//! Wraps `PgPool` + `AuthConfig` and owns auth-specific SQL queries.
//! Uses runtime `sqlx::query_as` (not macros) like every repository in
//! the workspace.

use sqlx::PgPool;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::types::AuthIdentity;

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(pool: PgPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Issue a token for an identity using this backend's configuration
    pub fn issue_token(&self, user: &AuthIdentity) -> Result<String, AuthError> {
        crate::jwt::issue_token(user, &self.config)
    }

    /// Find user identity by ID
    pub(crate) async fn find_user(&self, id: i64) -> Result<Option<AuthIdentity>, AuthError> {
        let user: Option<AuthIdentity> = sqlx::query_as(
            r#"
            SELECT id, username, email, first_name, last_name,
                   is_active, date_joined
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user)
    }

    /// Validate a token and load the user it was issued for.
    pub(crate) async fn authenticate_token(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = crate::jwt::validate_token(token, &self.config)?;

        let user_id: i64 = claims.sub.parse().map_err(|_| AuthError::InvalidUserId)?;

        let user = self
            .find_user(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        Ok(AuthContext::new(user))
    }
}
