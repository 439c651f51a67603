//! Transactional free functions for the boards domain

use crate::domain::entities::Board;
use sqlx::{Postgres, Transaction};

/// Insert a board within an existing transaction.
pub async fn create_board_tx(
    transaction: &mut Transaction<'_, Postgres>,
    title: &str,
    owner_id: i64,
) -> std::result::Result<Board, sqlx::Error> {
    let board = sqlx::query_as::<_, Board>(
        r#"
        INSERT INTO boards (title, owner_id, created_at, updated_at)
        VALUES ($1, $2, NOW(), NOW())
        RETURNING id, title, owner_id, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(owner_id)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(board)
}

/// Update a board's title within an existing transaction.
pub async fn update_board_title_tx(
    transaction: &mut Transaction<'_, Postgres>,
    board_id: i64,
    title: &str,
) -> std::result::Result<(), sqlx::Error> {
    sqlx::query("UPDATE boards SET title = $2, updated_at = NOW() WHERE id = $1")
        .bind(board_id)
        .bind(title)
        .execute(&mut **transaction)
        .await?;
    Ok(())
}

/// Replace a board's member set within an existing transaction.
///
/// Callers pass the normalized id list, which always contains the owner.
/// Tickets assigned to, or reviewed by, a removed member lose that
/// participant so assignee and reviewer stay within the member set.
pub async fn replace_members_tx(
    transaction: &mut Transaction<'_, Postgres>,
    board_id: i64,
    member_ids: &[i64],
) -> std::result::Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM board_members WHERE board_id = $1 AND user_id <> ALL($2)")
        .bind(board_id)
        .bind(member_ids)
        .execute(&mut **transaction)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO board_members (board_id, user_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT (board_id, user_id) DO NOTHING
        "#,
    )
    .bind(board_id)
    .bind(member_ids)
    .execute(&mut **transaction)
    .await?;

    sqlx::query(
        r#"
        UPDATE tickets SET
            assignee_id = CASE WHEN assignee_id = ANY($2) THEN assignee_id END,
            reviewer_id = CASE WHEN reviewer_id = ANY($2) THEN reviewer_id END,
            updated_at = NOW()
        WHERE board_id = $1
          AND (assignee_id <> ALL($2) OR reviewer_id <> ALL($2))
        "#,
    )
    .bind(board_id)
    .bind(member_ids)
    .execute(&mut **transaction)
    .await?;

    sqlx::query("UPDATE boards SET updated_at = NOW() WHERE id = $1")
        .bind(board_id)
        .execute(&mut **transaction)
        .await?;

    Ok(())
}
