//! Board management API handlers
//!
//! Board CRUD and member management. Reads require membership; deletion is
//! reserved for the owner.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use kanban_accounts::UserSummary;
use kanban_common::{Error, Result, ResultExt, ValidatedJson, ValidatedPath};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::{AuthUser, BoardsState};
use crate::domain::access::BoardAccess;
use crate::domain::entities::{normalize_member_ids, Board, BoardSummary, BoardTicket};

const NOT_A_MEMBER: &str = "You must be a member of the board to access it.";
const NOT_THE_OWNER: &str = "Only the board owner can delete the board.";

/// Request for creating a new board
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    #[serde(deserialize_with = "kanban_common::trim::trimmed")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title must be between 1 and 100 characters."
    ))]
    pub title: String,

    /// User ids to add as members; the owner is always added
    #[serde(default)]
    pub members: Vec<i64>,
}

/// Request for updating a board
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBoardRequest {
    #[serde(default, deserialize_with = "kanban_common::trim::trimmed_option")]
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title must be between 1 and 100 characters."
    ))]
    pub title: Option<String>,

    /// Replacement member set; the owner is always retained
    pub members: Option<Vec<i64>>,
}

/// Full board detail
#[derive(Debug, Serialize)]
pub struct BoardDetailResponse {
    pub id: i64,
    pub title: String,
    pub owner_id: i64,
    pub members: Vec<UserSummary>,
    pub tasks: Vec<BoardTicket>,
}

/// Board returned after an update
#[derive(Debug, Serialize)]
pub struct BoardUpdateResponse {
    pub id: i64,
    pub title: String,
    pub owner_data: Option<UserSummary>,
    pub members_data: Vec<UserSummary>,
}

/// Load a board's access policy or fail with 404
async fn load_access(state: &BoardsState, board_id: i64) -> Result<BoardAccess> {
    state
        .repos
        .boards
        .access(board_id)
        .await?
        .ok_or_else(|| Error::NotFound("Board not found.".to_string()))
}

/// Reject member ids that do not name existing users
async fn ensure_users_exist(state: &BoardsState, user_ids: &[i64]) -> Result<()> {
    let missing = state.repos.boards.missing_user_ids(user_ids).await?;
    if !missing.is_empty() {
        return Err(Error::Validation(format!(
            "Unknown member ids: {:?}",
            missing
        )));
    }
    Ok(())
}

/// List boards for the current user
///
/// **GET /boards/**
///
/// Returns every board the user owns or is a member of, with counts.
pub async fn list_boards(
    AuthUser(auth): AuthUser,
    State(state): State<BoardsState>,
) -> Result<Json<Vec<BoardSummary>>> {
    let boards = state
        .repos
        .boards
        .list_for_user(auth.user_id())
        .await
        .during("retrieving boards")?;
    Ok(Json(boards))
}

/// Create a new board
///
/// **POST /boards/**
///
/// The caller becomes the owner and is always a member. The board and its
/// member set are written in one transaction.
pub async fn create_board(
    AuthUser(auth): AuthUser,
    State(state): State<BoardsState>,
    ValidatedJson(request): ValidatedJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<BoardSummary>)> {
    let owner_id = auth.user_id();
    let title = Board::validate_title(&request.title)?;
    let member_ids = normalize_member_ids(owner_id, &request.members);

    ensure_users_exist(&state, &member_ids).await?;

    let mut tx = state
        .repos
        .begin()
        .await
        .during("creating board")?;

    let board = crate::create_board_tx(&mut tx, &title, owner_id)
        .await
        .during("creating board")?;
    crate::replace_members_tx(&mut tx, board.id, &member_ids)
        .await
        .during("creating board")?;

    tx.commit().await.during("creating board")?;

    tracing::info!(board_id = board.id, owner_id, "Board created");

    let summary = state
        .repos
        .boards
        .get_summary(board.id)
        .await?
        .ok_or_else(|| Error::Internal("Board missing after creation".to_string()))?;

    Ok((StatusCode::CREATED, Json(summary)))
}

/// Get board details
///
/// **GET /boards/{id}/**
pub async fn get_board(
    AuthUser(auth): AuthUser,
    State(state): State<BoardsState>,
    ValidatedPath(board_id): ValidatedPath<i64>,
) -> Result<Json<BoardDetailResponse>> {
    let access = load_access(&state, board_id).await?;
    access.require_member(auth.user_id(), NOT_A_MEMBER)?;

    let board = state
        .repos
        .boards
        .get_by_id(board_id)
        .await?
        .ok_or_else(|| Error::NotFound("Board not found.".to_string()))?;

    let members = state.repos.boards.members(board_id).await?;
    let tasks = state.repos.boards.tickets(board_id).await?;

    Ok(Json(BoardDetailResponse {
        id: board.id,
        title: board.title,
        owner_id: board.owner_id,
        members,
        tasks,
    }))
}

/// Update a board's title and/or member set
///
/// **PATCH /boards/{id}/**
pub async fn update_board(
    AuthUser(auth): AuthUser,
    State(state): State<BoardsState>,
    ValidatedPath(board_id): ValidatedPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateBoardRequest>,
) -> Result<Json<BoardUpdateResponse>> {
    let access = load_access(&state, board_id).await?;
    access.require_member(auth.user_id(), NOT_A_MEMBER)?;

    let title = request
        .title
        .as_deref()
        .map(Board::validate_title)
        .transpose()?;

    let member_ids = request
        .members
        .as_deref()
        .map(|ids| normalize_member_ids(access.owner_id, ids));

    if let Some(ids) = &member_ids {
        ensure_users_exist(&state, ids).await?;
    }

    let mut tx = state
        .repos
        .begin()
        .await
        .during("updating board")?;

    if let Some(title) = &title {
        crate::update_board_title_tx(&mut tx, board_id, title)
            .await
            .during("updating board")?;
    }
    if let Some(ids) = &member_ids {
        crate::replace_members_tx(&mut tx, board_id, ids)
            .await
            .during("updating board")?;
    }

    tx.commit().await.during("updating board")?;

    tracing::info!(board_id, user_id = auth.user_id(), "Board updated");

    let board = state
        .repos
        .boards
        .get_by_id(board_id)
        .await?
        .ok_or_else(|| Error::NotFound("Board not found.".to_string()))?;

    let owner_data = state.repos.boards.user_summary(board.owner_id).await?;
    let members_data = state.repos.boards.members(board_id).await?;

    Ok(Json(BoardUpdateResponse {
        id: board.id,
        title: board.title,
        owner_data,
        members_data,
    }))
}

/// Delete a board
///
/// **DELETE /boards/{id}/**
///
/// Owner only. Tickets and their comments are removed with the board.
pub async fn delete_board(
    AuthUser(auth): AuthUser,
    State(state): State<BoardsState>,
    ValidatedPath(board_id): ValidatedPath<i64>,
) -> Result<StatusCode> {
    let access = load_access(&state, board_id).await?;
    access.require_owner(auth.user_id(), NOT_THE_OWNER)?;

    state
        .repos
        .boards
        .delete(board_id)
        .await
        .during("deleting board")?;

    tracing::info!(board_id, user_id = auth.user_id(), "Board deleted");

    Ok(StatusCode::NO_CONTENT)
}
