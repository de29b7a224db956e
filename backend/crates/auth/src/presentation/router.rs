//! Auth Router

use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthServices;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, services: AuthServices) -> Router {
    auth_router_generic(repo, services)
}

/// Create a generic Auth router for any repository implementation
///
/// `/profile` sits behind the gate; `/register`, `/login` and `/logout` are
/// public.
pub fn auth_router_generic<R>(repo: R, services: AuthServices) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let gate = services.gate();
    let state = AuthAppState {
        repo: Arc::new(repo),
        services,
    };

    Router::new()
        .route("/profile", get(handlers::profile::<R>))
        .route_layer(middleware::from_fn_with_state(gate, require_auth))
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", get(handlers::logout::<R>))
        .with_state(state)
}
