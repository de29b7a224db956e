//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Every read and write is scoped by owner. Nothing here fetches or changes
//! a task by id alone.

use kernel::id::{TaskId, UserId};

use crate::domain::entities::Task;
use crate::error::TaskResult;

/// Task repository trait
#[trait_variant::make(TaskRepository: Send)]
pub trait LocalTaskRepository {
    /// All tasks of `owner_id`, oldest first
    async fn list_for_owner(&self, owner_id: &UserId) -> TaskResult<Vec<Task>>;

    /// The task if it exists and belongs to `owner_id`
    async fn find_owned(&self, task_id: &TaskId, owner_id: &UserId) -> TaskResult<Option<Task>>;

    /// Insert a new task
    async fn create(&self, task: &Task) -> TaskResult<()>;

    /// Persist `task` where both its id and owner match; `false` if no row did
    async fn update_owned(&self, task: &Task) -> TaskResult<bool>;

    /// Delete where both id and owner match; `false` if no row did
    async fn delete_owned(&self, task_id: &TaskId, owner_id: &UserId) -> TaskResult<bool>;
}
