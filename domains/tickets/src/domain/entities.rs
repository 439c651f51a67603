//! Domain entities for the tickets domain
//!
//! A ticket belongs to exactly one board for its whole life. Its assignee and
//! reviewer, when set, must be members of that board.

use chrono::{DateTime, NaiveDate, Utc};
use kanban_accounts::UserSummary;
use kanban_boards::BoardAccess;
use kanban_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum ticket title length (varchar(255))
pub const MAX_TITLE_LENGTH: usize = 255;

/// Workflow state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    ToDo,
    InProgress,
    Review,
    Done,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::ToDo => write!(f, "to-do"),
            TicketStatus::InProgress => write!(f, "in-progress"),
            TicketStatus::Review => write!(f, "review"),
            TicketStatus::Done => write!(f, "done"),
        }
    }
}

/// Priority level of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketPriority::Low => write!(f, "low"),
            TicketPriority::Medium => write!(f, "medium"),
            TicketPriority::High => write!(f, "high"),
        }
    }
}

/// Ticket entity
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Ticket {
    pub id: i64,
    pub board_id: i64,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assignee_id: Option<i64>,
    pub reviewer_id: Option<i64>,
    pub created_by: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ticket about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub board_id: i64,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assignee_id: Option<i64>,
    pub reviewer_id: Option<i64>,
    pub created_by: i64,
    pub due_date: Option<NaiveDate>,
}

impl NewTicket {
    /// Normalize the title and check the participants against the board
    pub fn validated(mut self, access: &BoardAccess) -> Result<Self> {
        self.title = validate_title(&self.title)?;
        check_participants(self.assignee_id, self.reviewer_id, access)?;
        Ok(self)
    }
}

/// Partial update of a ticket.
///
/// For the nullable relations the outer `Option` says whether the field was
/// sent at all; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assignee_id: Option<Option<i64>>,
    pub reviewer_id: Option<Option<i64>>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl Ticket {
    /// Apply a partial update, enforcing the same rules as creation.
    ///
    /// Only participants named in `changes` are checked against the board.
    pub fn apply(&mut self, changes: TicketChanges, access: &BoardAccess) -> Result<()> {
        check_participants(
            changes.assignee_id.flatten(),
            changes.reviewer_id.flatten(),
            access,
        )?;

        if let Some(title) = changes.title {
            self.title = validate_title(&title)?;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(assignee_id) = changes.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(reviewer_id) = changes.reviewer_id {
            self.reviewer_id = reviewer_id;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        Ok(())
    }

    /// The creator and the board owner may delete a ticket
    pub fn can_delete(&self, user_id: i64, access: &BoardAccess) -> bool {
        self.created_by == Some(user_id) || access.is_owner(user_id)
    }
}

fn validate_title(title: &str) -> Result<String> {
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

fn check_participants(
    assignee_id: Option<i64>,
    reviewer_id: Option<i64>,
    access: &BoardAccess,
) -> Result<()> {
    if let Some(id) = assignee_id {
        if !access.is_member(id) {
            return Err(Error::Validation(
                "The assignee must be a member of the board.".to_string(),
            ));
        }
    }
    if let Some(id) = reviewer_id {
        if !access.is_member(id) {
            return Err(Error::Validation(
                "The reviewer must be a member of the board.".to_string(),
            ));
        }
    }
    Ok(())
}

/// Ticket representation returned by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketView {
    pub id: i64,
    pub board: i64,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assignee: Option<UserSummary>,
    pub reviewer: Option<UserSummary>,
    pub due_date: Option<NaiveDate>,
    pub comments_count: i64,
}
