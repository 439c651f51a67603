//! Authentication for the Kanban API
//!
//! Provides password hashing, token issuance and validation, and axum
//! extractors that work with any domain state implementing `FromRef<S>`
//! for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
mod password;
mod types;

pub use backend::AuthBackend;
pub use claims::TokenClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use jwt::issue_token;
pub use password::{hash_password, verify_password};
pub use types::AuthIdentity;
