//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases, tokens and configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, gate middleware
//!
//! ## Features
//! - Registration with email + password (JSON or form bodies)
//! - Login issuing a stateless HS256 access token (body + cookie)
//! - Gate middleware authenticating protected routes of any crate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool
//! - Tokens signed with a single startup-loaded secret, algorithm pinned
//! - Login failures are indistinguishable in body and timing
//! - Handlers only see identities the gate produced (`CurrentUser`)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, AuthServices, ConfigError, SigningSecret};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{AuthGate, CurrentUser, require_auth};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::user::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;

    #[cfg(any(test, feature = "test-support"))]
    pub use crate::infra::memory::InMemoryUserRepository;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
