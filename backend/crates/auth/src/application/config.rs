//! Application Configuration
//!
//! Configuration for the Auth application layer, and the long-lived services
//! built from it once at startup.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use platform::password::{HashCost, PasswordHashError, PasswordHasher};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::application::token::{TokenIssuer, TokenVerifier};
use crate::presentation::middleware::AuthGate;

/// Re-export cookie settings from platform
pub use platform::cookie::{CookieConfig, SameSite};

/// Default token lifetime (30 minutes)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Length of generated development secrets
const RANDOM_SECRET_LEN: usize = 32;

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT signing secret must not be empty")]
    EmptySecret,

    #[error("Token TTL must be between 1 second and {max} seconds")]
    InvalidTokenTtl { max: u64 },

    #[error("Invalid password hashing parameters: {0}")]
    HashCost(#[from] PasswordHashError),
}

// ============================================================================
// Signing secret
// ============================================================================

/// HMAC key for token signatures. Never empty; zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self(bytes))
    }

    /// Random secret for development and tests
    pub fn random() -> Self {
        Self(platform::crypto::random_bytes(RANDOM_SECRET_LEN))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Auth config
// ============================================================================

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token signing key
    pub signing_secret: SigningSecret,
    /// Lifetime of issued tokens; also the cookie Max-Age
    pub token_ttl: Duration,
    /// Token cookie attributes
    pub cookie: CookieConfig,
    /// Argon2id cost for new hashes
    pub hash_cost: HashCost,
    /// Upper bound on concurrent hash/verify jobs
    pub hash_concurrency: usize,
}

impl AuthConfig {
    /// Production defaults around the given secret
    pub fn new(signing_secret: SigningSecret) -> Self {
        Self {
            signing_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            cookie: CookieConfig::default(),
            hash_cost: HashCost::default(),
            hash_concurrency: default_hash_concurrency(),
        }
    }

    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        Self::new(SigningSecret::random())
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        let mut config = Self::with_random_secret();
        config.cookie.secure = false;
        config
    }

    /// Token TTL in whole seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // Bounded so that `iat + ttl` cannot overflow a unix timestamp.
        const MAX_TTL_SECS: u64 = 365 * 24 * 3600;
        let secs = self.token_ttl.as_secs();
        if secs == 0 || secs > MAX_TTL_SECS {
            return Err(ConfigError::InvalidTokenTtl { max: MAX_TTL_SECS });
        }
        Ok(())
    }
}

fn default_hash_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

// ============================================================================
// Services
// ============================================================================

/// Long-lived auth services shared by every request
#[derive(Debug, Clone)]
pub struct AuthServices {
    pub config: Arc<AuthConfig>,
    pub hasher: Arc<PasswordHasher>,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
}

impl AuthServices {
    pub fn new(config: AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let hasher = PasswordHasher::new(config.hash_cost, config.hash_concurrency)?;
        let issuer = TokenIssuer::new(&config.signing_secret, config.token_ttl);
        let verifier = TokenVerifier::new(&config.signing_secret);

        Ok(Self {
            config: Arc::new(config),
            hasher: Arc::new(hasher),
            issuer: Arc::new(issuer),
            verifier: Arc::new(verifier),
        })
    }

    /// The gate protecting routes with these services' tokens
    pub fn gate(&self) -> AuthGate {
        AuthGate::new(self.verifier.clone(), self.config.cookie.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            SigningSecret::new(Vec::new()),
            Err(ConfigError::EmptySecret)
        ));
        assert!(SigningSecret::new(b"k".to_vec()).is_ok());
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = SigningSecret::new(b"super-secret".to_vec()).unwrap();
        assert!(!format!("{secret:?}").contains("super-secret"));
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::with_random_secret();
        assert_eq!(config.token_ttl, Duration::from_secs(1800));
        assert_eq!(config.token_ttl_secs(), 1800);
        assert_eq!(config.cookie.name, "jwt-token");
        assert!(config.cookie.secure);
        assert_eq!(config.cookie.same_site, SameSite::Strict);
        assert!(config.hash_concurrency >= 1);
        assert!(!AuthConfig::development().cookie.secure);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = AuthConfig::with_random_secret();
        config.token_ttl = Duration::ZERO;
        assert!(matches!(
            AuthServices::new(config),
            Err(ConfigError::InvalidTokenTtl { .. })
        ));
    }

    #[test]
    fn test_services_build() {
        let mut config = AuthConfig::development();
        config.hash_cost = HashCost::minimal();
        config.hash_concurrency = 2;

        let services = AuthServices::new(config).unwrap();
        assert_eq!(services.hasher.max_concurrent(), 2);
    }
}
