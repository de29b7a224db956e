//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod get_profile;
pub mod sign_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use config::{AuthConfig, AuthServices, ConfigError, SigningSecret};
pub use get_profile::GetProfileUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{AccessClaims, IssuedToken, TokenError, TokenIssuer, TokenVerifier};
