//! Repository implementations for the boards domain

pub mod boards;
pub mod transactions;

use sqlx::{PgPool, Postgres, Transaction};

pub use boards::BoardRepository;
pub use transactions::{create_board_tx, replace_members_tx, update_board_title_tx};

/// Combined repository access for the boards domain
#[derive(Clone)]
pub struct BoardsRepositories {
    pool: PgPool,
    pub boards: BoardRepository,
}

impl BoardsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            boards: BoardRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
