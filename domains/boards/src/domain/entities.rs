//! Domain entities for the boards domain

use chrono::{DateTime, NaiveDate, Utc};
use kanban_accounts::UserSummary;
use kanban_common::{Error, Result};
use serde::Serialize;

/// Maximum board title length (varchar(100))
pub const MAX_TITLE_LENGTH: usize = 100;

/// Board entity
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Board {
    pub id: i64,
    pub title: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Trim and validate a board title
    pub fn validate_title(title: &str) -> Result<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("Title may not be blank.".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(Error::Validation(format!(
                "Title must be at most {} characters",
                MAX_TITLE_LENGTH
            )));
        }
        Ok(title.to_string())
    }
}

/// Board list entry with aggregate counts
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct BoardSummary {
    pub id: i64,
    pub title: String,
    pub owner_id: i64,
    pub member_count: i64,
    pub ticket_count: i64,
    pub tasks_to_do_count: i64,
    pub tasks_high_prio_count: i64,
}

/// Ticket as embedded in a board detail response.
///
/// Read model over the tickets table; status and priority are carried as
/// their wire strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardTicket {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assignee: Option<UserSummary>,
    pub reviewer: Option<UserSummary>,
    pub due_date: Option<NaiveDate>,
    pub comments_count: i64,
}

/// Deduplicate requested member ids and make sure the owner is included.
///
/// Order of first appearance is preserved, with the owner first.
pub fn normalize_member_ids(owner_id: i64, requested: &[i64]) -> Vec<i64> {
    let mut ids = vec![owner_id];
    for id in requested {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }
    ids
}
