//! Create Task Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Task;
use crate::domain::repository::TaskRepository;
use crate::domain::value_objects::{TaskPriority, TaskTitle};
use crate::error::TaskResult;

/// Input for create task
pub struct CreateTaskInput {
    pub title: String,
    pub priority: Option<TaskPriority>,
}

/// Create Task Use Case
pub struct CreateTaskUseCase<R>
where
    R: TaskRepository,
{
    repo: Arc<R>,
}

impl<R> CreateTaskUseCase<R>
where
    R: TaskRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// New tasks always start as pending
    pub async fn execute(&self, owner_id: UserId, input: CreateTaskInput) -> TaskResult<Task> {
        let title = TaskTitle::new(&input.title)?;
        let task = Task::new(owner_id, title, input.priority);

        self.repo.create(&task).await?;

        tracing::info!(
            task_id = %task.task_id,
            user_id = %owner_id,
            "Task created"
        );

        Ok(task)
    }
}
