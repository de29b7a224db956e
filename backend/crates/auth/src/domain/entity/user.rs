//! User Entity
//!
//! An account: login email, password digest and profile details.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, profile_field::ProfileField, user_password::UserPassword,
};

/// Optional personal details collected at registration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub first_name: ProfileField,
    pub last_name: ProfileField,
    pub phone: ProfileField,
}

/// User entity
///
/// The password digest is held here but never leaves the crate through a
/// response; `Debug` output of [`UserPassword`] is redacted.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, normalized login identifier
    pub email: Email,
    pub password: UserPassword,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id
    pub fn new(email: Email, password: UserPassword, profile: Profile) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password,
            profile,
            created_at: now,
            updated_at: now,
        }
    }
}
