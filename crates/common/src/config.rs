//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default lifetime of issued auth tokens (24 hours)
const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,
    pub database_max_connections: u32,

    /// Token signing configuration
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
    pub token_ttl_secs: u64,

    /// Comma-separated list of allowed CORS origins; permissive when unset
    pub cors_allowed_origins: Option<String>,

    /// Runtime configuration
    pub log_format: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_issuer: non_empty_var("JWT_ISSUER"),
            jwt_audience: non_empty_var("JWT_AUDIENCE"),
            token_ttl_secs: parse_or("TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS),

            cors_allowed_origins: non_empty_var("CORS_ALLOWED_ORIGINS"),

            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "kanban=debug".to_string()),
            port: parse_or("PORT", 3000),
        };

        if config.jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        Ok(config)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
