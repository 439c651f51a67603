//! HTTP handlers for the boards domain

pub mod boards;
