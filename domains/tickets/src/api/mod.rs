//! API layer for the tickets domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::TicketsState;
pub use routes::routes;
