//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use kernel::extract::JsonOrForm;
use std::sync::Arc;

use crate::application::config::AuthServices;
use crate::application::{
    GetProfileUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, LogoutResponse, ProfileResponse, RegisterRequest,
    RegisterResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub services: AuthServices,
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonOrForm(req): JsonOrForm<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.services.hasher.clone());

    let input = SignUpInput {
        email: req.email,
        password: req.password,
        first_name: req.firstname,
        last_name: req.lastname,
        phone: req.phone,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully".to_string(),
            user_id: output.user_id.into_uuid(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
///
/// The token is returned in the body for bearer use and set as a cookie for
/// browser use.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.services.hasher.clone(),
        state.services.issuer.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let expires_in = output.token.expires_in();
    let expires_at = output
        .token
        .claims
        .expires_at()
        .ok_or_else(|| AuthError::Internal("token expiry out of range".to_string()))?;

    let cookie = state
        .services
        .config
        .cookie
        .build_set_cookie(&output.token.token, expires_in, expires_at);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie_header(&cookie)?)],
        Json(LoginResponse {
            token: output.token.token,
            token_type: "Bearer",
            expires_in,
            user_id: output.user_id.into_uuid(),
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
///
/// Clears the cookie. Tokens are stateless, so one already handed out stays
/// valid until it expires.
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.services.config.cookie.build_expired_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie_header(&cookie)?)],
        Json(LogoutResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    ))
}

// ============================================================================
// Profile (behind the gate)
// ============================================================================

/// GET /profile
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    current_user: CurrentUser,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let user = use_case.execute(current_user.user_id()).await?;

    Ok(Json(ProfileResponse::from(user)))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn cookie_header(cookie: &str) -> AuthResult<HeaderValue> {
    platform::cookie::to_header_value(cookie)
        .ok_or_else(|| AuthError::Internal("cookie is not a valid header value".to_string()))
}
