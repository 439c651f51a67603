//! Tickets domain: tasks on a board with status, priority, assignee and reviewer

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    NewTicket, Ticket, TicketChanges, TicketPriority, TicketStatus, TicketView, MAX_TITLE_LENGTH,
};

// Re-export repository types
pub use repository::{TicketRepository, TicketsRepositories};

// Re-export API types
pub use api::routes;
pub use api::TicketsState;
