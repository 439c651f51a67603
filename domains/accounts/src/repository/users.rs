//! User repository

use crate::domain::entities::{NewUser, User};
use kanban_common::RepositoryError;
use sqlx::PgPool;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find user by e-mail (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   is_active, date_joined
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check whether an e-mail address is already registered
    pub async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert a new user.
    ///
    /// Returns `RepositoryError::AlreadyExists` when the e-mail or username is taken.
    pub async fn create(&self, user: &NewUser, password_hash: &str) -> Result<User, RepositoryError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, first_name, last_name,
                               is_active, date_joined)
            VALUES ($1, $2, $3, $4, $5, TRUE, NOW())
            RETURNING id, username, email, password_hash, first_name, last_name,
                      is_active, date_joined
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
