//! Comments domain: notes attached to tickets

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{author_display_name, Comment, CommentView, MAX_CONTENT_LENGTH};

// Re-export repository types
pub use repository::{CommentRepository, CommentsRepositories};

// Re-export API types
pub use api::routes;
pub use api::CommentsState;
