//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::PasswordHasher;

use crate::domain::entity::user::{Profile, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, profile_field::ProfileField, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<PasswordHasher>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<PasswordHasher>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate everything before touching the store
        let email = Email::new(&input.email)?;
        let profile = Profile {
            first_name: ProfileField::new("firstname", input.first_name)?,
            last_name: ProfileField::new("lastname", input.last_name)?,
            phone: ProfileField::new("phone", input.phone)?,
        };
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = self.hasher.hash(raw_password.into_inner()).await?;
        let user = User::new(email, password.into(), profile);

        // A racing registration surfaces here as EmailTaken from the unique index
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(SignUpOutput {
            user_id: user.user_id,
        })
    }
}
