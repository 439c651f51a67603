//! HTTP handlers for the tickets domain

pub mod tickets;
