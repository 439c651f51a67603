//! API endpoint integration tests
//!
//! Drive the composed router against PostgreSQL. Run with a provisioned
//! database: `TEST_DATABASE_URL=... cargo test -p kanban-integration-tests -- --ignored`

#![allow(dead_code)]

mod accounts;
mod boards;
mod comments;
mod common;
mod tickets;
