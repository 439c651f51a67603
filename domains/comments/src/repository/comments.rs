//! Comment repository

use crate::domain::entities::{author_display_name, Comment, CommentView};
use chrono::{DateTime, Utc};
use kanban_common::RepositoryError;
use sqlx::PgPool;

type RepoResult<T> = std::result::Result<T, RepositoryError>;

#[derive(sqlx::FromRow)]
struct CommentViewRow {
    id: i64,
    created_at: DateTime<Utc>,
    content: String,
    first_name: String,
    last_name: String,
    username: String,
}

impl From<CommentViewRow> for CommentView {
    fn from(row: CommentViewRow) -> Self {
        CommentView {
            id: row.id,
            created_at: row.created_at,
            author: author_display_name(&row.first_name, &row.last_name, &row.username),
            content: row.content,
        }
    }
}

#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find comment by ID
    pub async fn get_by_id(&self, comment_id: i64) -> RepoResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, author_id, ticket_id, content, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Comments on a ticket, oldest first
    pub async fn list_for_ticket(&self, ticket_id: i64) -> RepoResult<Vec<CommentView>> {
        let rows = sqlx::query_as::<_, CommentViewRow>(
            r#"
            SELECT c.id, c.created_at, c.content, u.first_name, u.last_name, u.username
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.ticket_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentView::from).collect())
    }

    /// Insert a comment and return its API representation
    pub async fn create(
        &self,
        ticket_id: i64,
        author_id: i64,
        content: &str,
    ) -> RepoResult<CommentView> {
        let row = sqlx::query_as::<_, CommentViewRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (author_id, ticket_id, content, created_at)
                VALUES ($1, $2, $3, NOW())
                RETURNING id, author_id, created_at, content
            )
            SELECT i.id, i.created_at, i.content, u.first_name, u.last_name, u.username
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(author_id)
        .bind(ticket_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn delete(&self, comment_id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
