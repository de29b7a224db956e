//! Domain Entities
//!
//! Core business entities for the task domain.

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};

use crate::domain::value_objects::{TaskPriority, TaskStatus, TaskTitle};

/// Task entity - a to-do item owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub task_id: TaskId,
    pub owner_id: UserId,
    pub title: TaskTitle,
    pub status: TaskStatus,
    pub priority: Option<TaskPriority>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<TaskTitle>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.priority.is_none()
    }
}

impl Task {
    /// Create a new pending task
    pub fn new(owner_id: UserId, title: TaskTitle, priority: Option<TaskPriority>) -> Self {
        let now = Utc::now();
        Self {
            task_id: TaskId::new(),
            owner_id,
            title,
            status: TaskStatus::Pending,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. `updated_at` moves only if something was set.
    pub fn apply(&mut self, changes: TaskChanges) {
        if changes.is_empty() {
            return;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(priority) = changes.priority {
            self.priority = Some(priority);
        }
        self.updated_at = Utc::now();
    }
}
