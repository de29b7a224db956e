//! Sign In Use Case
//!
//! Verifies credentials and issues an access token.
//!
//! Every failure path (malformed email, unknown email, wrong password) returns
//! the same [`AuthError::InvalidCredentials`] after the same amount of hashing
//! work, so neither the response nor its timing reveals which check failed.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::PasswordHasher;

use crate::application::token::{IssuedToken, TokenIssuer};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user_id: UserId,
    pub token: IssuedToken,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<PasswordHasher>,
    issuer: Arc<TokenIssuer>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<PasswordHasher>, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            user_repo,
            hasher,
            issuer,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let password = RawPassword::for_login(input.password).into_inner();

        let user = match Email::new(&input.email) {
            Ok(email) => self.user_repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.hasher.verify_dummy(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(user.password.hashed(), password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issuer.issue(user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user_id: user.user_id,
            token,
        })
    }
}
