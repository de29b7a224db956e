//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Every use case takes the caller's id from the auth gate and passes it to
//! the repository as the ownership predicate.

pub mod create_task;
pub mod delete_task;
pub mod list_tasks;
pub mod update_task;

// Re-exports
pub use create_task::{CreateTaskInput, CreateTaskUseCase};
pub use delete_task::DeleteTaskUseCase;
pub use list_tasks::ListTasksUseCase;
pub use update_task::{UpdateTaskInput, UpdateTaskUseCase};
