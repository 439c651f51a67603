//! API layer for the boards domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::BoardsState;
pub use routes::routes;
