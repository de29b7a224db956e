//! Auth Middleware
//!
//! The gate in front of every protected route, and the identity it hands to
//! handlers.
//!
//! ## Token transport
//! 1. `Authorization: Bearer <token>`
//! 2. otherwise the token cookie
//!
//! The header wins when both are present. An `Authorization` header using any
//! other scheme is ignored and the cookie is consulted.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;

use crate::application::token::TokenVerifier;
use crate::error::{AuthError, AuthResult};

/// Authenticated caller, placed in request extensions by [`require_auth`]
///
/// Only the gate can construct one. Handlers take it as an extractor; if it is
/// missing the request fails with 500 before the handler body runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    user_id: UserId,
}

impl CurrentUser {
    pub(crate) fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or(AuthError::MissingIdentity)
    }
}

/// Token checking service shared by all protected routes
#[derive(Debug, Clone)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
    cookie_name: String,
}

impl AuthGate {
    pub fn new(verifier: Arc<TokenVerifier>, cookie_name: impl Into<String>) -> Self {
        Self {
            verifier,
            cookie_name: cookie_name.into(),
        }
    }

    /// Decide whether a request carries a valid token
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<CurrentUser> {
        let token = bearer_token(headers)
            .or_else(|| platform::cookie::extract_cookie(headers, &self.cookie_name))
            .ok_or(AuthError::MissingToken)?;

        let claims = self.verifier.verify(&token)?;
        Ok(CurrentUser::new(claims.user_id()))
    }
}

/// Token from `Authorization: Bearer <token>`; scheme is case-insensitive
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

/// Middleware that requires a valid access token
///
/// Wire with `axum::middleware::from_fn_with_state(gate, require_auth)` as a
/// route layer.
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = gate.authenticate(req.headers()).inspect_err(|e| {
        tracing::debug!(reason = %e, path = %req.uri().path(), "Rejected unauthenticated request");
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
