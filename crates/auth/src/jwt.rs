//! Token issuance, validation and header extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::TokenClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::AuthIdentity;

/// Issue a signed HS256 token for a user
pub fn issue_token(user: &AuthIdentity, config: &AuthConfig) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp().max(0) as u64;

    let claims = TokenClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        iat: now,
        exp: now + config.token_ttl_secs,
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
        tracing::error!(error = %e, user_id = user.id, "Failed to sign token");
        AuthError::TokenIssueFailed
    })
}

/// Validate a token issued by `issue_token`
pub(crate) fn validate_token(token: &str, config: &AuthConfig) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);

    if let Some(aud) = &config.audience {
        validation.set_audience(&[aud]);
    } else {
        validation.validate_aud = false;
    }

    if let Some(iss) = &config.issuer {
        validation.set_issuer(&[iss]);
    }

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<TokenClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Token validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract the token from an Authorization header.
///
/// Accepts `Bearer <token>` and the `Token <token>` scheme used by older clients.
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    let token = header_str
        .strip_prefix("Bearer ")
        .or_else(|| header_str.strip_prefix("Token "))
        .map(str::trim)
        .ok_or(AuthError::InvalidAuthorizationFormat)?;

    if token.is_empty() {
        return Err(AuthError::InvalidAuthorizationFormat);
    }

    Ok(token.to_string())
}
