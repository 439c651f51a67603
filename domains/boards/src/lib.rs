//! Boards domain: boards, membership, board access policy

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::access::BoardAccess;
pub use domain::entities::{
    normalize_member_ids, Board, BoardSummary, BoardTicket, MAX_TITLE_LENGTH,
};

// Re-export repository types
pub use repository::{
    create_board_tx, replace_members_tx, update_board_title_tx, BoardRepository,
    BoardsRepositories,
};

// Re-export API types
pub use api::routes;
pub use api::BoardsState;
