//! Registration and login handlers
//!
//! Implements:
//! - POST /registration/ - create an account and issue a token
//! - POST /login/ - exchange e-mail and password for a token

use axum::{extract::State, http::StatusCode, Json};
use kanban_auth::{hash_password, verify_password};
use kanban_common::{Error, RepositoryError, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{NewUser, User};

const EMAIL_TAKEN: &str = "This e-mail address is already taken!";
const PASSWORD_MISMATCH: &str = "The passwords don't match!";
const CREDENTIALS_REQUIRED: &str = "E-mail and password are required.";
const INVALID_CREDENTIALS: &str = "Invalid e-mail or password.";
const INACTIVE_ACCOUNT: &str = "This account is not active.";

/// Request for `POST /registration/`
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[serde(deserialize_with = "kanban_common::trim::trimmed")]
    #[validate(length(max = 301, message = "Full name is too long."))]
    pub fullname: String,

    #[serde(deserialize_with = "kanban_common::trim::trimmed")]
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Enter a valid email address.")
    )]
    pub email: String,

    #[validate(length(
        min = 1,
        max = 128,
        message = "Password must be between 1 and 128 characters."
    ))]
    pub password: String,

    pub repeated_password: String,
}

/// Request for `POST /login/`
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "kanban_common::trim::trimmed")]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Token response shared by registration and login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub fullname: String,
    pub email: String,
    pub user_id: i64,
}

impl TokenResponse {
    fn new(token: String, user: &User) -> Self {
        Self {
            token,
            fullname: user.display_name(),
            email: user.email.clone(),
            user_id: user.id,
        }
    }
}

/// Register a new account
///
/// **POST /registration/**
///
/// Validation order: field formats, e-mail uniqueness, password confirmation.
/// The password is hashed only once every check has passed.
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RegistrationRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let new_user = NewUser::from_registration(&request.fullname, &request.email)?;

    if state.repos.users.email_exists(&new_user.email).await? {
        return Err(Error::Validation(EMAIL_TAKEN.to_string()));
    }

    if request.password != request.repeated_password {
        return Err(Error::Validation(PASSWORD_MISMATCH.to_string()));
    }

    let password_hash = hash_blocking(request.password).await?;

    let user = state
        .repos
        .users
        .create(&new_user, &password_hash)
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration for the same address
            RepositoryError::AlreadyExists => Error::Validation(EMAIL_TAKEN.to_string()),
            other => other.into(),
        })?;

    let token = state.auth.issue_token(&user.identity())?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(TokenResponse::new(token, &user))))
}

/// Log in with e-mail and password
///
/// **POST /login/**
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let email = request.email.trim();
    if email.is_empty() || request.password.is_empty() {
        return Err(Error::Validation(CREDENTIALS_REQUIRED.to_string()));
    }

    let user = state
        .repos
        .users
        .find_by_email(email)
        .await?
        .ok_or_else(|| Error::Validation(INVALID_CREDENTIALS.to_string()))?;

    let stored_hash = user.password_hash.clone();
    let password = request.password;
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| Error::Internal(format!("Password verification task failed: {}", e)))?;

    if !matches {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(Error::Validation(INVALID_CREDENTIALS.to_string()));
    }

    if !user.is_active {
        return Err(Error::Validation(INACTIVE_ACCOUNT.to_string()));
    }

    let token = state.auth.issue_token(&user.identity())?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(TokenResponse::new(token, &user)))
}

/// Argon2 is CPU-bound; keep it off the async worker threads.
async fn hash_blocking(password: String) -> Result<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {}", e)))??;
    Ok(hash)
}
