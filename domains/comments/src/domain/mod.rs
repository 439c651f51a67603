//! Domain layer for comments

pub mod entities;
