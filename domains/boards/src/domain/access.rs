//! Board access policy
//!
//! A user may act on a board (and on its tickets and comments) when they own
//! it or belong to its member set. Destructive board operations require the
//! owner. Ticket and comment endpoints load a `BoardAccess` through the
//! boards repository and call into it instead of comparing ids themselves.

use kanban_common::{Error, Result};
use serde::Serialize;

/// Owner and member set of one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BoardAccess {
    pub board_id: i64,
    pub owner_id: i64,
    pub member_ids: Vec<i64>,
}

impl BoardAccess {
    pub fn is_owner(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }

    /// The owner always counts as a member
    pub fn is_member(&self, user_id: i64) -> bool {
        self.is_owner(user_id) || self.member_ids.contains(&user_id)
    }

    /// 403 with `message` unless `user_id` is owner or member
    pub fn require_member(&self, user_id: i64, message: &str) -> Result<()> {
        if self.is_member(user_id) {
            Ok(())
        } else {
            Err(Error::Authorization(message.to_string()))
        }
    }

    /// 403 with `message` unless `user_id` owns the board
    pub fn require_owner(&self, user_id: i64, message: &str) -> Result<()> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(Error::Authorization(message.to_string()))
        }
    }
}
