//! List Tasks Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Task;
use crate::domain::repository::TaskRepository;
use crate::error::TaskResult;

pub struct ListTasksUseCase<R>
where
    R: TaskRepository,
{
    repo: Arc<R>,
}

impl<R> ListTasksUseCase<R>
where
    R: TaskRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner_id: UserId) -> TaskResult<Vec<Task>> {
        self.repo.list_for_owner(&owner_id).await
    }
}
