//! Password Hashing and Verification
//!
//! Argon2id password handling with:
//! - Fresh 128-bit salt per hash, drawn from the OS RNG
//! - Zeroization of clear text passwords
//! - Constant-time verification (inside `argon2`)
//! - Bounded concurrency: hashing runs on the blocking pool behind a semaphore,
//!   so a burst of sign-ins cannot starve the async executor
//!
//! ## Storage format
//! Hashes are PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`), so the
//! cost parameters travel with each hash and old hashes keep verifying after the
//! configured cost changes.

use std::fmt;
use std::sync::Arc;

use argon2::password_hash::{self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;
use tokio::sync::{OnceCell, Semaphore};
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maximum accepted password length in characters.
///
/// Bounds the work a single request can ask the hasher to do.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Salt length in bytes
const SALT_LEN: usize = 16;

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Refused to hash an empty password
    #[error("Password must not be empty")]
    EmptyPassword,

    /// The OS randomness source could not produce a salt
    #[error("Randomness source unavailable: {0}")]
    RandomnessUnavailable(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored digest is not a valid Argon2id PHC string
    #[error("Malformed password hash")]
    MalformedHash,

    /// Cost parameters rejected by argon2
    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),

    /// The blocking worker panicked or the pool shut down
    #[error("Hashing worker failed: {0}")]
    WorkerFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Unicode is NFKC-normalized so visually identical input hashes identically
/// - Does not implement `Clone`
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Self {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in Unicode code points
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    ///
    /// Rejects anything that is not a parsable Argon2id PHC string, including
    /// truncated hashes and other algorithms.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        Self::parse(&hash)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    fn parse(hash: &str) -> Result<PasswordHash<'_>, PasswordHashError> {
        let parsed = PasswordHash::new(hash).map_err(|_| PasswordHashError::MalformedHash)?;
        if parsed.algorithm != Algorithm::Argon2id.ident() || parsed.hash.is_none() {
            return Err(PasswordHashError::MalformedHash);
        }
        Ok(parsed)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hash cost
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommendation: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashCost {
    /// The cheapest parameters argon2 accepts. Tests only.
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn params(&self) -> Result<Params, PasswordHashError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))
    }
}

// ============================================================================
// Hasher service
// ============================================================================

/// Argon2id hasher with a bounded number of concurrent hash operations
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
    dummy: OnceCell<HashedPassword>,
}

impl PasswordHasher {
    /// ## Arguments
    /// * `cost` - Argon2id parameters for new hashes
    /// * `max_concurrent` - Upper bound on simultaneous hash/verify jobs (min 1)
    pub fn new(cost: HashCost, max_concurrent: usize) -> Result<Self, PasswordHashError> {
        let max_concurrent = max_concurrent.max(1);
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, cost.params()?),
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
            dummy: OnceCell::new(),
        })
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Hash a password on the blocking pool
    pub async fn hash(&self, password: ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        if password.is_empty() {
            return Err(PasswordHashError::EmptyPassword);
        }
        let argon2 = self.argon2.clone();
        self.run_blocking(move || hash_with(&argon2, &password)).await
    }

    /// Verify a password against a stored hash on the blocking pool
    ///
    /// Returns `Ok(false)` on mismatch; errors only for a malformed digest or a
    /// failed worker.
    pub async fn verify(
        &self,
        hashed: &HashedPassword,
        password: ClearTextPassword,
    ) -> Result<bool, PasswordHashError> {
        let argon2 = self.argon2.clone();
        let hashed = hashed.clone();
        self.run_blocking(move || verify_with(&argon2, &hashed, &password))
            .await
    }

    /// Spend the same work as a real verification against a throwaway hash.
    ///
    /// Used when there is no account to check, so that response timing does
    /// not reveal whether an account exists.
    pub async fn verify_dummy(&self, password: ClearTextPassword) -> Result<(), PasswordHashError> {
        let dummy = self.dummy_hash().await?;
        self.verify(dummy, password).await.map(|_| ())
    }

    /// Build the throwaway hash ahead of the first request
    ///
    /// Without this the first [`verify_dummy`](Self::verify_dummy) call also
    /// pays for a hash.
    pub async fn warm_up(&self) -> Result<(), PasswordHashError> {
        self.dummy_hash().await.map(|_| ())
    }

    async fn dummy_hash(&self) -> Result<&HashedPassword, PasswordHashError> {
        self.dummy
            .get_or_try_init(|| async {
                self.hash(ClearTextPassword::new("timing-equalization".to_string()))
                    .await
            })
            .await
    }

    async fn run_blocking<T, F>(&self, job: F) -> Result<T, PasswordHashError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| PasswordHashError::WorkerFailed(e.to_string()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| PasswordHashError::WorkerFailed(e.to_string()))?
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("max_concurrent", &self.max_concurrent)
            .finish_non_exhaustive()
    }
}

fn hash_with(
    argon2: &Argon2<'_>,
    password: &ClearTextPassword,
) -> Result<HashedPassword, PasswordHashError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt_bytes)
        .map_err(|e| PasswordHashError::RandomnessUnavailable(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    Ok(HashedPassword {
        hash: hash.to_string(),
    })
}

fn verify_with(
    argon2: &Argon2<'_>,
    hashed: &HashedPassword,
    password: &ClearTextPassword,
) -> Result<bool, PasswordHashError> {
    let parsed = HashedPassword::parse(&hashed.hash)?;
    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(_) => Err(PasswordHashError::MalformedHash),
    }
}

// ============================================================================
// Tests
// ============================================================================
