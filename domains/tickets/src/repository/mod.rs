//! Repository implementations for the tickets domain

pub mod tickets;

use kanban_boards::BoardRepository;
use sqlx::PgPool;

pub use tickets::TicketRepository;

/// Combined repository access for the tickets domain
#[derive(Clone)]
pub struct TicketsRepositories {
    pub tickets: TicketRepository,
    /// Board access lookups for the membership policy
    pub boards: BoardRepository,
}

impl TicketsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            tickets: TicketRepository::new(pool.clone()),
            boards: BoardRepository::new(pool),
        }
    }
}
