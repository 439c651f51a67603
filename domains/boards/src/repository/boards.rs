//! Board repository
//!
//! Member and ticket lists are read straight from the `users` and `tickets`
//! tables as read models; those tables are owned by other domains.

use crate::domain::access::BoardAccess;
use crate::domain::entities::{Board, BoardSummary, BoardTicket};
use chrono::NaiveDate;
use kanban_accounts::{OptionalUserColumns, UserColumns, UserSummary};
use kanban_common::RepositoryError;
use sqlx::PgPool;

type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Aggregate columns shared by the list and single-summary queries
const SUMMARY_SELECT: &str = r#"
    SELECT b.id, b.title, b.owner_id,
           (SELECT COUNT(*) FROM board_members m WHERE m.board_id = b.id) AS member_count,
           (SELECT COUNT(*) FROM tickets t WHERE t.board_id = b.id) AS ticket_count,
           (SELECT COUNT(*) FROM tickets t
             WHERE t.board_id = b.id AND t.status = 'to-do') AS tasks_to_do_count,
           (SELECT COUNT(*) FROM tickets t
             WHERE t.board_id = b.id AND t.priority = 'high') AS tasks_high_prio_count
    FROM boards b
"#;

/// Flat row for a ticket embedded in the board detail
#[derive(sqlx::FromRow)]
struct BoardTicketRow {
    id: i64,
    title: String,
    description: String,
    status: String,
    priority: String,
    due_date: Option<NaiveDate>,
    comments_count: i64,
    assignee_id: Option<i64>,
    assignee_email: Option<String>,
    assignee_first_name: Option<String>,
    assignee_last_name: Option<String>,
    reviewer_id: Option<i64>,
    reviewer_email: Option<String>,
    reviewer_first_name: Option<String>,
    reviewer_last_name: Option<String>,
}

impl From<BoardTicketRow> for BoardTicket {
    fn from(row: BoardTicketRow) -> Self {
        let assignee = OptionalUserColumns {
            id: row.assignee_id,
            email: row.assignee_email,
            first_name: row.assignee_first_name,
            last_name: row.assignee_last_name,
        }
        .into_summary();
        let reviewer = OptionalUserColumns {
            id: row.reviewer_id,
            email: row.reviewer_email,
            first_name: row.reviewer_first_name,
            last_name: row.reviewer_last_name,
        }
        .into_summary();

        BoardTicket {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            assignee,
            reviewer,
            due_date: row.due_date,
            comments_count: row.comments_count,
        }
    }
}

#[derive(Clone)]
pub struct BoardRepository {
    pool: PgPool,
}

impl BoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find board by ID
    pub async fn get_by_id(&self, board_id: i64) -> RepoResult<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, title, owner_id, created_at, updated_at
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(board_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(board)
    }

    /// Load owner and member ids for the access policy
    pub async fn access(&self, board_id: i64) -> RepoResult<Option<BoardAccess>> {
        let access = sqlx::query_as::<_, BoardAccess>(
            r#"
            SELECT b.id AS board_id, b.owner_id,
                   COALESCE(
                       ARRAY_AGG(m.user_id ORDER BY m.user_id)
                           FILTER (WHERE m.user_id IS NOT NULL),
                       '{}'
                   ) AS member_ids
            FROM boards b
            LEFT JOIN board_members m ON m.board_id = b.id
            WHERE b.id = $1
            GROUP BY b.id, b.owner_id
            "#,
        )
        .bind(board_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(access)
    }

    /// Boards the user owns or belongs to, with aggregate counts
    pub async fn list_for_user(&self, user_id: i64) -> RepoResult<Vec<BoardSummary>> {
        let query = format!(
            r#"{SUMMARY_SELECT}
            WHERE b.owner_id = $1
               OR EXISTS (SELECT 1 FROM board_members m
                          WHERE m.board_id = b.id AND m.user_id = $1)
            ORDER BY b.id ASC
            "#
        );
        let boards = sqlx::query_as::<_, BoardSummary>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(boards)
    }

    /// Aggregate counts for a single board
    pub async fn get_summary(&self, board_id: i64) -> RepoResult<Option<BoardSummary>> {
        let query = format!("{SUMMARY_SELECT} WHERE b.id = $1");
        let summary = sqlx::query_as::<_, BoardSummary>(&query)
            .bind(board_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(summary)
    }

    /// Members of a board as nested users, ordered by user id
    pub async fn members(&self, board_id: i64) -> RepoResult<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserColumns>(
            r#"
            SELECT u.id, u.email, u.first_name, u.last_name
            FROM board_members m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.board_id = $1
            ORDER BY u.id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }

    /// A single user as a nested summary
    pub async fn user_summary(&self, user_id: i64) -> RepoResult<Option<UserSummary>> {
        let row = sqlx::query_as::<_, UserColumns>(
            "SELECT id, email, first_name, last_name FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserSummary::from))
    }

    /// Tickets of a board with nested assignee/reviewer and comment counts
    pub async fn tickets(&self, board_id: i64) -> RepoResult<Vec<BoardTicket>> {
        let rows = sqlx::query_as::<_, BoardTicketRow>(
            r#"
            SELECT t.id, t.title, t.description,
                   t.status::TEXT AS status, t.priority::TEXT AS priority,
                   t.due_date,
                   (SELECT COUNT(*) FROM comments c WHERE c.ticket_id = t.id) AS comments_count,
                   a.id AS assignee_id, a.email AS assignee_email,
                   a.first_name AS assignee_first_name, a.last_name AS assignee_last_name,
                   r.id AS reviewer_id, r.email AS reviewer_email,
                   r.first_name AS reviewer_first_name, r.last_name AS reviewer_last_name
            FROM tickets t
            LEFT JOIN users a ON a.id = t.assignee_id
            LEFT JOIN users r ON r.id = t.reviewer_id
            WHERE t.board_id = $1
            ORDER BY t.id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BoardTicket::from).collect())
    }

    /// Of the given user ids, those that do not exist
    pub async fn missing_user_ids(&self, user_ids: &[i64]) -> RepoResult<Vec<i64>> {
        let missing = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT requested.id
            FROM UNNEST($1::BIGINT[]) AS requested(id)
            WHERE NOT EXISTS (SELECT 1 FROM users u WHERE u.id = requested.id)
            ORDER BY requested.id
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(missing)
    }

    /// Delete a board; tickets, comments and memberships cascade
    pub async fn delete(&self, board_id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(board_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
