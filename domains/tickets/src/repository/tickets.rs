//! Ticket repository

use crate::domain::entities::{NewTicket, Ticket, TicketPriority, TicketStatus, TicketView};
use chrono::NaiveDate;
use kanban_accounts::OptionalUserColumns;
use kanban_common::RepositoryError;
use sqlx::PgPool;

type RepoResult<T> = std::result::Result<T, RepositoryError>;

const TICKET_COLUMNS: &str = r#"
    id, board_id, title, description, status, priority,
    assignee_id, reviewer_id, created_by, due_date, created_at, updated_at
"#;

/// Select list for `TicketView` rows, joined with assignee and reviewer
const VIEW_SELECT: &str = r#"
    SELECT t.id, t.board_id, t.title, t.description, t.status, t.priority, t.due_date,
           (SELECT COUNT(*) FROM comments c WHERE c.ticket_id = t.id) AS comments_count,
           a.id AS assignee_id, a.email AS assignee_email,
           a.first_name AS assignee_first_name, a.last_name AS assignee_last_name,
           r.id AS reviewer_id, r.email AS reviewer_email,
           r.first_name AS reviewer_first_name, r.last_name AS reviewer_last_name
    FROM tickets t
    LEFT JOIN users a ON a.id = t.assignee_id
    LEFT JOIN users r ON r.id = t.reviewer_id
"#;

#[derive(sqlx::FromRow)]
struct TicketViewRow {
    id: i64,
    board_id: i64,
    title: String,
    description: String,
    status: TicketStatus,
    priority: TicketPriority,
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

impl From<TicketViewRow> for TicketView {
    fn from(row: TicketViewRow) -> Self {
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

        TicketView {
            id: row.id,
            board: row.board_id,
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
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find ticket by ID
    pub async fn get_by_id(&self, ticket_id: i64) -> RepoResult<Option<Ticket>> {
        let query = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = $1");
        let ticket = sqlx::query_as::<_, Ticket>(&query)
            .bind(ticket_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(ticket)
    }

    /// API representation of a ticket
    pub async fn get_view(&self, ticket_id: i64) -> RepoResult<Option<TicketView>> {
        let query = format!("{VIEW_SELECT} WHERE t.id = $1");
        let row = sqlx::query_as::<_, TicketViewRow>(&query)
            .bind(ticket_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TicketView::from))
    }

    /// Tickets assigned to a user, ordered by id
    pub async fn list_assigned_to(&self, user_id: i64) -> RepoResult<Vec<TicketView>> {
        self.list_where("t.assignee_id = $1", user_id).await
    }

    /// Tickets a user reviews, ordered by id
    pub async fn list_reviewed_by(&self, user_id: i64) -> RepoResult<Vec<TicketView>> {
        self.list_where("t.reviewer_id = $1", user_id).await
    }

    async fn list_where(&self, predicate: &str, user_id: i64) -> RepoResult<Vec<TicketView>> {
        let query = format!("{VIEW_SELECT} WHERE {predicate} ORDER BY t.id ASC");
        let rows = sqlx::query_as::<_, TicketViewRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(TicketView::from).collect())
    }

    /// Insert a new ticket
    pub async fn create(&self, ticket: &NewTicket) -> RepoResult<Ticket> {
        let query = format!(
            r#"
            INSERT INTO tickets (board_id, title, description, status, priority,
                                 assignee_id, reviewer_id, created_by, due_date,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
            RETURNING {TICKET_COLUMNS}
            "#
        );
        let created = sqlx::query_as::<_, Ticket>(&query)
            .bind(ticket.board_id)
            .bind(&ticket.title)
            .bind(&ticket.description)
            .bind(ticket.status)
            .bind(ticket.priority)
            .bind(ticket.assignee_id)
            .bind(ticket.reviewer_id)
            .bind(ticket.created_by)
            .bind(ticket.due_date)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Persist the mutable fields of a ticket
    pub async fn update(&self, ticket: &Ticket) -> RepoResult<Ticket> {
        let query = format!(
            r#"
            UPDATE tickets SET
                title = $2,
                description = $3,
                status = $4,
                priority = $5,
                assignee_id = $6,
                reviewer_id = $7,
                due_date = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TICKET_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Ticket>(&query)
            .bind(ticket.id)
            .bind(&ticket.title)
            .bind(&ticket.description)
            .bind(ticket.status)
            .bind(ticket.priority)
            .bind(ticket.assignee_id)
            .bind(ticket.reviewer_id)
            .bind(ticket.due_date)
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Delete a ticket; its comments cascade
    pub async fn delete(&self, ticket_id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(ticket_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
