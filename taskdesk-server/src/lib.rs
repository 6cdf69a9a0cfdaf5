//! `TaskDesk` backend library.
//!
//! Exposes the task-creation server for use in tests and embedding.
//! The server validates `POST /api/tasks/` payloads and stores created
//! tasks in memory.

pub mod config;
pub mod server;
pub mod store;
pub mod validation;
