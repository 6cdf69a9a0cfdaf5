//! Shared wire types for the `TaskDesk` task-creation protocol.

pub mod codec;
pub mod errors;
pub mod task;

pub use errors::{ErrorBody, FieldErrors};
pub use task::{CreateTaskRequest, CreateTaskResponse, STATUS_OPTIONS, Task, TaskStatus};
