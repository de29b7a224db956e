//! HTTP Handlers
//!
//! Every handler takes the caller from [`CurrentUser`]; nothing in a request
//! body or path can name an owner.

use auth::CurrentUser;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::JsonBody;
use kernel::id::TaskId;
use std::sync::Arc;

use crate::application::{
    CreateTaskInput, CreateTaskUseCase, DeleteTaskUseCase, ListTasksUseCase, UpdateTaskInput,
    UpdateTaskUseCase,
};
use crate::domain::repository::TaskRepository;
use crate::error::{TaskError, TaskResult};
use crate::presentation::dto::{
    CreateTaskRequest, TaskListResponse, TaskResponse, UpdateTaskRequest,
};

/// Shared state for task handlers
#[derive(Clone)]
pub struct TaskAppState<R>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /tasks
pub async fn list_tasks<R>(
    State(state): State<TaskAppState<R>>,
    current_user: CurrentUser,
) -> TaskResult<Json<TaskListResponse>>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListTasksUseCase::new(state.repo.clone());
    let tasks = use_case.execute(current_user.user_id()).await?;

    Ok(Json(TaskListResponse::from(tasks)))
}

/// POST /task/create
pub async fn create_task<R>(
    State(state): State<TaskAppState<R>>,
    current_user: CurrentUser,
    JsonBody(req): JsonBody<CreateTaskRequest>,
) -> TaskResult<impl IntoResponse>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateTaskUseCase::new(state.repo.clone());
    let task = use_case
        .execute(
            current_user.user_id(),
            CreateTaskInput {
                title: req.title,
                priority: req.priority,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// PUT /task/update/{id}
pub async fn update_task<R>(
    State(state): State<TaskAppState<R>>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateTaskRequest>,
) -> TaskResult<Json<TaskResponse>>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let task_id = parse_task_id(&id)?;

    let use_case = UpdateTaskUseCase::new(state.repo.clone());
    let task = use_case
        .execute(
            current_user.user_id(),
            task_id,
            UpdateTaskInput {
                title: req.title,
                status: req.status,
                priority: req.priority,
            },
        )
        .await?;

    Ok(Json(TaskResponse::from(task)))
}

/// DELETE /task/delete/{id}
pub async fn delete_task<R>(
    State(state): State<TaskAppState<R>>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> TaskResult<StatusCode>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let task_id = parse_task_id(&id)?;

    let use_case = DeleteTaskUseCase::new(state.repo.clone());
    use_case.execute(current_user.user_id(), task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// A malformed id cannot name any task, so it is reported like a missing one
fn parse_task_id(raw: &str) -> TaskResult<TaskId> {
    raw.parse().map_err(|_| TaskError::NotFound)
}
