//! In-memory task repository for tests

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::{TaskId, UserId};
use tokio::sync::RwLock;

use crate::domain::entities::Task;
use crate::domain::repository::TaskRepository;
use crate::error::TaskResult;

#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Fetch by id regardless of owner. Tests only; lets assertions see
    /// through the ownership filter.
    pub async fn get_unscoped(&self, task_id: &TaskId) -> Option<Task> {
        self.tasks.read().await.get(task_id).cloned()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    async fn list_for_owner(&self, owner_id: &UserId) -> TaskResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| &t.owner_id == owner_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.task_id.as_uuid().cmp(b.task_id.as_uuid()))
        });
        Ok(tasks)
    }

    async fn find_owned(&self, task_id: &TaskId, owner_id: &UserId) -> TaskResult<Option<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .get(task_id)
            .filter(|t| &t.owner_id == owner_id)
            .cloned())
    }

    async fn create(&self, task: &Task) -> TaskResult<()> {
        self.tasks.write().await.insert(task.task_id, task.clone());
        Ok(())
    }

    async fn update_owned(&self, task: &Task) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.task_id) {
            Some(stored) if stored.owner_id == task.owner_id => {
                *stored = task.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_owned(&self, task_id: &TaskId, owner_id: &UserId) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;
        if tasks.get(task_id).is_some_and(|t| &t.owner_id == owner_id) {
            tasks.remove(task_id);
            return Ok(true);
        }
        Ok(false)
    }
}
