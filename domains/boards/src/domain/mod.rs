//! Boards domain layer: entities and the access policy

pub mod access;
pub mod entities;
