//! API Server Library
//!
//! Startup pieces shared by the binary and the integration tests.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

pub mod app;
pub mod config;
pub mod telemetry;

pub use app::build_router;
pub use config::ApiConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
