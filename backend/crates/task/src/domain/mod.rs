//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Task)
//! - Domain value objects (TaskTitle, TaskStatus, TaskPriority)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
