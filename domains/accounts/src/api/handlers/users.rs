//! User lookup handler
//!
//! Implements:
//! - GET /email-check/?email= - resolve an e-mail address to a user

use axum::{
    extract::{Query, State},
    Json,
};
use kanban_common::{Error, Result};
use serde::Deserialize;
use validator::ValidateEmail;

use crate::api::middleware::{AccountsState, AuthUser};
use crate::domain::entities::UserSummary;

/// Query parameters for `GET /email-check/`
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    /// The trimmed, well-formed e-mail address from the query
    fn email(&self) -> Result<String> {
        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| Error::Validation("The email query parameter is required.".to_string()))?
            .to_string();

        if !email.validate_email() {
            return Err(Error::Validation("Enter a valid email address.".to_string()));
        }

        Ok(email)
    }
}

/// Look up a user by e-mail
///
/// **GET /email-check/?email=**
///
/// Used by clients to resolve addresses before adding board members.
pub async fn email_check(
    _auth: AuthUser,
    State(state): State<AccountsState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<UserSummary>> {
    let email = query.email()?;

    let user = state
        .repos
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| Error::NotFound("Email not found.".to_string()))?;

    Ok(Json(UserSummary::from(&user)))
}
