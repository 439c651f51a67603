//! Accounts domain: registration, login, e-mail lookup

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    split_fullname, NewUser, OptionalUserColumns, User, UserColumns, UserSummary,
};

// Re-export repository types
pub use repository::{AccountsRepositories, UserRepository};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;
