//! Domain entities for the comments domain

use chrono::{DateTime, Utc};
use kanban_common::{Error, Result};
use serde::Serialize;

/// Maximum comment length (varchar(255))
pub const MAX_CONTENT_LENGTH: usize = 255;

/// Comment entity
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub author_id: i64,
    pub ticket_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Trim and bound comment content
    pub fn validate_content(content: &str) -> Result<String> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::Validation("Content may not be blank.".to_string()));
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(Error::Validation(format!(
                "Content must be at most {} characters",
                MAX_CONTENT_LENGTH
            )));
        }
        Ok(content.to_string())
    }

    pub fn belongs_to(&self, ticket_id: i64) -> bool {
        self.ticket_id == ticket_id
    }
}

/// Comment representation returned by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    /// Author's full name, or username when no name is set
    pub author: String,
    pub content: String,
}

/// Full name of an author, falling back to the username
pub fn author_display_name(first_name: &str, last_name: &str, username: &str) -> String {
    let fullname = format!("{} {}", first_name, last_name);
    let fullname = fullname.trim();
    if fullname.is_empty() {
        username.to_string()
    } else {
        fullname.to_string()
    }
}
