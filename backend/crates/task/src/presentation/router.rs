//! Task Router

use auth::{AuthGate, require_auth};
use axum::{
    Router,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::domain::repository::TaskRepository;
use crate::infra::postgres::PgTaskRepository;
use crate::presentation::handlers::{self, TaskAppState};

/// Create the Task router with PostgreSQL repository
pub fn task_router(repo: PgTaskRepository, gate: AuthGate) -> Router {
    task_router_generic(repo, gate)
}

/// Create a generic Task router for any repository implementation
///
/// Every route sits behind the gate.
pub fn task_router_generic<R>(repo: R, gate: AuthGate) -> Router
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let state = TaskAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/tasks", get(handlers::list_tasks::<R>))
        .route("/task/create", post(handlers::create_task::<R>))
        .route("/task/update/{id}", put(handlers::update_task::<R>))
        .route("/task/delete/{id}", delete(handlers::delete_task::<R>))
        .route_layer(middleware::from_fn_with_state(gate, require_auth))
        .with_state(state)
}
