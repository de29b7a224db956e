//! Delete Task Use Case

use std::sync::Arc;

use kernel::id::{TaskId, UserId};

use crate::domain::repository::TaskRepository;
use crate::error::{TaskError, TaskResult};

pub struct DeleteTaskUseCase<R>
where
    R: TaskRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteTaskUseCase<R>
where
    R: TaskRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner_id: UserId, task_id: TaskId) -> TaskResult<()> {
        if !self.repo.delete_owned(&task_id, &owner_id).await? {
            return Err(TaskError::NotFound);
        }

        tracing::info!(task_id = %task_id, user_id = %owner_id, "Task deleted");
        Ok(())
    }
}
