//! HTTP handlers for the comments domain

pub mod comments;
