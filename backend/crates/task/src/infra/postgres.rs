//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Task;
use crate::domain::repository::TaskRepository;
use crate::domain::value_objects::{TaskPriority, TaskStatus, TaskTitle};
use crate::error::{TaskError, TaskResult};

/// PostgreSQL-backed task repository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TaskRepository for PgTaskRepository {
    async fn list_for_owner(&self, owner_id: &UserId) -> TaskResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, owner_id, title, status, priority, created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at ASC, task_id ASC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    async fn find_owned(&self, task_id: &TaskId, owner_id: &UserId) -> TaskResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, owner_id, title, status, priority, created_at, updated_at
            FROM tasks
            WHERE task_id = $1 AND owner_id = $2
            "#,
        )
        .bind(task_id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaskRow::into_task).transpose()
    }

    async fn create(&self, task: &Task) -> TaskResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                task_id,
                owner_id,
                title,
                status,
                priority,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(task.owner_id.as_uuid())
        .bind(task.title.as_str())
        .bind(task.status.as_str())
        .bind(task.priority.map(|p| p.as_str()))
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn update_owned(&self, task: &Task) -> TaskResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tasks SET
                title = $3,
                status = $4,
                priority = $5,
                updated_at = $6
            WHERE task_id = $1 AND owner_id = $2
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(task.owner_id.as_uuid())
        .bind(task.title.as_str())
        .bind(task.status.as_str())
        .bind(task.priority.map(|p| p.as_str()))
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_owned(&self, task_id: &TaskId, owner_id: &UserId) -> TaskResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1 AND owner_id = $2")
            .bind(task_id.as_uuid())
            .bind(owner_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

/// The owner row is gone if the foreign key fails
fn map_insert_error(err: sqlx::Error) -> TaskError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            return TaskError::OwnerMissing;
        }
    }
    TaskError::Database(err)
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    task_id: Uuid,
    owner_id: Uuid,
    title: String,
    status: String,
    priority: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self) -> TaskResult<Task> {
        let status = TaskStatus::from_db(&self.status)
            .ok_or_else(|| TaskError::Internal(format!("Invalid status: {}", self.status)))?;
        let priority = self
            .priority
            .as_deref()
            .map(|p| {
                TaskPriority::from_db(p)
                    .ok_or_else(|| TaskError::Internal(format!("Invalid priority: {p}")))
            })
            .transpose()?;

        Ok(Task {
            task_id: TaskId::from_uuid(self.task_id),
            owner_id: UserId::from_uuid(self.owner_id),
            title: TaskTitle::from_db(self.title),
            status,
            priority,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
