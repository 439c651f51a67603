//! Repository implementations for the comments domain

pub mod comments;

use kanban_boards::BoardRepository;
use kanban_tickets::TicketRepository;
use sqlx::PgPool;

pub use comments::CommentRepository;

/// Combined repository access for the comments domain
#[derive(Clone)]
pub struct CommentsRepositories {
    pub comments: CommentRepository,
    pub tickets: TicketRepository,
    pub boards: BoardRepository,
}

impl CommentsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            comments: CommentRepository::new(pool.clone()),
            tickets: TicketRepository::new(pool.clone()),
            boards: BoardRepository::new(pool),
        }
    }
}
