//! Update Task Use Case

use std::sync::Arc;

use kernel::id::{TaskId, UserId};

use crate::domain::entities::{Task, TaskChanges};
use crate::domain::repository::TaskRepository;
use crate::domain::value_objects::{TaskPriority, TaskStatus, TaskTitle};
use crate::error::{TaskError, TaskResult};

/// Input for update task; absent fields stay as they are
#[derive(Debug, Default)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

/// Update Task Use Case
pub struct UpdateTaskUseCase<R>
where
    R: TaskRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateTaskUseCase<R>
where
    R: TaskRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner_id: UserId,
        task_id: TaskId,
        input: UpdateTaskInput,
    ) -> TaskResult<Task> {
        // Validate before looking anything up
        let changes = TaskChanges {
            title: input.title.as_deref().map(TaskTitle::new).transpose()?,
            status: input.status,
            priority: input.priority,
        };

        let mut task = self
            .repo
            .find_owned(&task_id, &owner_id)
            .await?
            .ok_or(TaskError::NotFound)?;

        if changes.is_empty() {
            return Ok(task);
        }
        task.apply(changes);

        // The row can vanish between the read and the write
        if !self.repo.update_owned(&task).await? {
            return Err(TaskError::NotFound);
        }

        tracing::info!(
            task_id = %task.task_id,
            user_id = %owner_id,
            status = %task.status,
            "Task updated"
        );

        Ok(task)
    }
}
