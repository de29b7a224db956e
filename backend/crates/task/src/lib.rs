//! Task Backend Module
//!
//! Per-user task lists. Every route requires an identity from the auth gate,
//! and every query is filtered by it.
//!
//! Clean Architecture structure:
//! - `domain/` - Task entity, value objects, repository trait
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{TaskError, TaskResult};
pub use infra::postgres::PgTaskRepository;
pub use presentation::router::task_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgTaskRepository as TaskStore;

    #[cfg(any(test, feature = "test-support"))]
    pub use crate::infra::memory::InMemoryTaskRepository;
}

pub mod router {
    pub use crate::presentation::router::*;
}
