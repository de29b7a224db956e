//! Domain Value Objects
//!
//! Immutable value types for the task domain.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum title length in characters
pub const TITLE_MAX_LENGTH: usize = 200;

/// Task title - trimmed, non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn new(raw: &str) -> AppResult<Self> {
        let title = raw.trim();

        if title.is_empty() {
            return Err(AppError::bad_request("Title cannot be empty"));
        }
        if title.chars().count() > TITLE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Title must be at most {TITLE_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(title.to_string()))
    }

    pub fn from_db(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Task lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    #[display("pending")]
    Pending,
    #[display("active")]
    Active,
    #[display("completed")]
    Completed,
    #[display("canceled")]
    Canceled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
            TaskStatus::Canceled => "canceled",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "active" => Some(TaskStatus::Active),
            "completed" => Some(TaskStatus::Completed),
            "canceled" => Some(TaskStatus::Canceled),
            _ => None,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    #[display("low")]
    Low,
    #[display("medium")]
    Medium,
    #[display("high")]
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}
