//! Shared utilities, configuration, and error handling for the Kanban API
//!
//! This crate provides common functionality used across the domain crates:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Request extractors and input-trimming serde helpers

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod trim;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result, ResultExt};
pub use extractors::{ValidatedJson, ValidatedPath};
