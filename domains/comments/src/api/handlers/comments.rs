//! Comment API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use kanban_boards::BoardAccess;
use kanban_common::{Error, Result, ResultExt, ValidatedJson, ValidatedPath};
use kanban_tickets::Ticket;
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::{AuthUser, CommentsState};
use crate::domain::entities::{Comment, CommentView};

const CANNOT_COMMENT: &str = "You are not allowed to comment this task.";
const CANNOT_DELETE: &str = "You must be a member of the board to delete comments.";

/// Request for posting a comment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(deserialize_with = "kanban_common::trim::trimmed")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content must be between 1 and 255 characters."
    ))]
    pub content: String,
}

/// Load the ticket and check the caller belongs to its board
async fn authorize(
    state: &CommentsState,
    ticket_id: i64,
    user_id: i64,
    forbidden: &str,
) -> Result<Ticket> {
    let ticket = state
        .repos
        .tickets
        .get_by_id(ticket_id)
        .await?
        .ok_or_else(|| Error::NotFound("Task not found.".to_string()))?;

    let access: BoardAccess = state
        .repos
        .boards
        .access(ticket.board_id)
        .await?
        .ok_or_else(|| Error::NotFound("Task not found.".to_string()))?;
    access.require_member(user_id, forbidden)?;

    Ok(ticket)
}

/// List comments on a ticket
///
/// **GET /tasks/{id}/comments/**
pub async fn list_comments(
    AuthUser(auth): AuthUser,
    State(state): State<CommentsState>,
    ValidatedPath(ticket_id): ValidatedPath<i64>,
) -> Result<Json<Vec<CommentView>>> {
    authorize(&state, ticket_id, auth.user_id(), CANNOT_COMMENT).await?;

    let comments = state
        .repos
        .comments
        .list_for_ticket(ticket_id)
        .await
        .during("retrieving comments")?;
    Ok(Json(comments))
}

/// Post a comment on a ticket
///
/// **POST /tasks/{id}/comments/**
pub async fn create_comment(
    AuthUser(auth): AuthUser,
    State(state): State<CommentsState>,
    ValidatedPath(ticket_id): ValidatedPath<i64>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentView>)> {
    let user_id = auth.user_id();
    authorize(&state, ticket_id, user_id, CANNOT_COMMENT).await?;

    let content = Comment::validate_content(&request.content)?;
    let comment = state
        .repos
        .comments
        .create(ticket_id, user_id, &content)
        .await
        .during("creating comment")?;

    tracing::info!(comment_id = comment.id, ticket_id, user_id, "Comment created");

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Delete a comment
///
/// **DELETE /tasks/{id}/comments/{comment_id}/**
///
/// Any board member may remove a comment on the board's tickets.
pub async fn delete_comment(
    AuthUser(auth): AuthUser,
    State(state): State<CommentsState>,
    ValidatedPath((ticket_id, comment_id)): ValidatedPath<(i64, i64)>,
) -> Result<StatusCode> {
    let user_id = auth.user_id();
    authorize(&state, ticket_id, user_id, CANNOT_DELETE).await?;

    let comment = state
        .repos
        .comments
        .get_by_id(comment_id)
        .await?
        .filter(|comment| comment.belongs_to(ticket_id))
        .ok_or_else(|| Error::NotFound("Comment not found.".to_string()))?;

    state
        .repos
        .comments
        .delete(comment.id)
        .await
        .during("deleting comment")?;

    tracing::info!(comment_id, ticket_id, user_id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}
