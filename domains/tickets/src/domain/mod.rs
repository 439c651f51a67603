//! Tickets domain layer: entities and business rules

pub mod entities;
