//! Ticket API handlers
//!
//! Every operation loads the board's access policy first. Reads and edits
//! require board membership; deletion is reserved for the ticket creator and
//! the board owner.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use kanban_boards::BoardAccess;
use kanban_common::{Error, Result, ResultExt, ValidatedJson, ValidatedPath};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::api::middleware::{AuthUser, TicketsState};
use crate::domain::entities::{
    NewTicket, Ticket, TicketChanges, TicketPriority, TicketStatus, TicketView,
};

const NOT_A_MEMBER: &str = "You must be a member of the board to manage its tasks.";
const CANNOT_DELETE: &str = "Only the task creator or the board owner can delete this task.";

/// Request for creating a ticket
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    /// Board id
    pub board: i64,

    #[serde(deserialize_with = "kanban_common::trim::trimmed")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters."
    ))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assignee_id: Option<i64>,
    pub reviewer_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
}

/// Partial update of a ticket
///
/// `assignee_id`, `reviewer_id` and `due_date` distinguish an absent field
/// from an explicit `null`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTicketRequest {
    /// Accepted only when it names the ticket's current board
    pub board: Option<i64>,

    #[serde(default, deserialize_with = "kanban_common::trim::trimmed_option")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters."
    ))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub assignee_id: Option<Option<i64>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub reviewer_id: Option<Option<i64>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl UpdateTicketRequest {
    fn into_changes(self) -> TicketChanges {
        TicketChanges {
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            assignee_id: self.assignee_id,
            reviewer_id: self.reviewer_id,
            due_date: self.due_date,
        }
    }
}

/// Wraps a present field in `Some`, so `null` becomes `Some(None)`
fn deserialize_some<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

async fn load_access(state: &TicketsState, board_id: i64) -> Result<BoardAccess> {
    state
        .repos
        .boards
        .access(board_id)
        .await?
        .ok_or_else(|| Error::NotFound("Board not found.".to_string()))
}

async fn load_ticket(state: &TicketsState, ticket_id: i64) -> Result<Ticket> {
    state
        .repos
        .tickets
        .get_by_id(ticket_id)
        .await?
        .ok_or_else(|| Error::NotFound("Task not found.".to_string()))
}

async fn load_view(state: &TicketsState, ticket_id: i64) -> Result<TicketView> {
    state
        .repos
        .tickets
        .get_view(ticket_id)
        .await?
        .ok_or_else(|| Error::NotFound("Task not found.".to_string()))
}

/// Create a ticket
///
/// **POST /tasks/**
pub async fn create_ticket(
    AuthUser(auth): AuthUser,
    State(state): State<TicketsState>,
    ValidatedJson(request): ValidatedJson<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketView>)> {
    let user_id = auth.user_id();
    let access = load_access(&state, request.board).await?;
    access.require_member(user_id, NOT_A_MEMBER)?;

    let new_ticket = NewTicket {
        board_id: request.board,
        title: request.title,
        description: request.description,
        status: request.status,
        priority: request.priority,
        assignee_id: request.assignee_id,
        reviewer_id: request.reviewer_id,
        created_by: user_id,
        due_date: request.due_date,
    }
    .validated(&access)?;

    let ticket = state
        .repos
        .tickets
        .create(&new_ticket)
        .await
        .during("creating task")?;

    tracing::info!(
        ticket_id = ticket.id,
        board_id = ticket.board_id,
        user_id,
        "Task created"
    );

    let view = load_view(&state, ticket.id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Get a ticket
///
/// **GET /tasks/{id}/**
pub async fn get_ticket(
    AuthUser(auth): AuthUser,
    State(state): State<TicketsState>,
    ValidatedPath(ticket_id): ValidatedPath<i64>,
) -> Result<Json<TicketView>> {
    let ticket = load_ticket(&state, ticket_id).await?;
    let access = load_access(&state, ticket.board_id).await?;
    access.require_member(auth.user_id(), NOT_A_MEMBER)?;

    Ok(Json(load_view(&state, ticket_id).await?))
}

/// Update a ticket
///
/// **PATCH /tasks/{id}/**
///
/// A ticket cannot move between boards.
pub async fn update_ticket(
    AuthUser(auth): AuthUser,
    State(state): State<TicketsState>,
    ValidatedPath(ticket_id): ValidatedPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateTicketRequest>,
) -> Result<Json<TicketView>> {
    let mut ticket = load_ticket(&state, ticket_id).await?;
    let access = load_access(&state, ticket.board_id).await?;
    access.require_member(auth.user_id(), NOT_A_MEMBER)?;

    if request.board.is_some_and(|board| board != ticket.board_id) {
        return Err(Error::Validation(
            "A task cannot be moved to another board.".to_string(),
        ));
    }

    ticket.apply(request.into_changes(), &access)?;
    state
        .repos
        .tickets
        .update(&ticket)
        .await
        .during("updating task")?;

    tracing::info!(ticket_id, user_id = auth.user_id(), "Task updated");

    Ok(Json(load_view(&state, ticket_id).await?))
}

/// Delete a ticket
///
/// **DELETE /tasks/{id}/**
pub async fn delete_ticket(
    AuthUser(auth): AuthUser,
    State(state): State<TicketsState>,
    ValidatedPath(ticket_id): ValidatedPath<i64>,
) -> Result<StatusCode> {
    let user_id = auth.user_id();
    let ticket = load_ticket(&state, ticket_id).await?;
    let access = load_access(&state, ticket.board_id).await?;
    access.require_member(user_id, NOT_A_MEMBER)?;

    if !ticket.can_delete(user_id, &access) {
        return Err(Error::Authorization(CANNOT_DELETE.to_string()));
    }

    state
        .repos
        .tickets
        .delete(ticket_id)
        .await
        .during("deleting task")?;

    tracing::info!(ticket_id, user_id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Tickets assigned to the current user
///
/// **GET /tasks/assigned-to-me/**
pub async fn list_assigned_to_me(
    AuthUser(auth): AuthUser,
    State(state): State<TicketsState>,
) -> Result<Json<Vec<TicketView>>> {
    let tickets = state
        .repos
        .tickets
        .list_assigned_to(auth.user_id())
        .await
        .during("retrieving tasks")?;
    Ok(Json(tickets))
}

/// Tickets the current user reviews
///
/// **GET /tasks/reviewing/**
pub async fn list_reviewing(
    AuthUser(auth): AuthUser,
    State(state): State<TicketsState>,
) -> Result<Json<Vec<TicketView>>> {
    let tickets = state
        .repos
        .tickets
        .list_reviewed_by(auth.user_id())
        .await
        .during("retrieving tasks")?;
    Ok(Json(tickets))
}
