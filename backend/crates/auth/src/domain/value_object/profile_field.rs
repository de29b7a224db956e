//! Profile Field Value Object
//!
//! First name, last name and phone share one rule: optional free text,
//! trimmed, at most [`PROFILE_FIELD_MAX_LENGTH`] characters.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

pub const PROFILE_FIELD_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProfileField(String);

impl ProfileField {
    /// ## Arguments
    /// * `field` - Field name used in the error message
    /// * `value` - Raw input; `None` is the same as empty
    pub fn new(field: &str, value: Option<String>) -> AppResult<Self> {
        let value = value.unwrap_or_default();
        let value = value.trim();

        if value.chars().count() > PROFILE_FIELD_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "{field} must be at most {PROFILE_FIELD_MAX_LENGTH} characters"
            )));
        }
        if value.chars().any(char::is_control) {
            return Err(AppError::bad_request(format!(
                "{field} contains invalid characters"
            )));
        }

        Ok(Self(value.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_empty() {
        assert_eq!(ProfileField::new("phone", None).unwrap().as_str(), "");
    }

    #[test]
    fn test_trimmed() {
        let name = ProfileField::new("firstname", Some("  Alice ".into())).unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_length_counted_in_chars() {
        assert!(ProfileField::new("lastname", Some("é".repeat(100))).is_ok());

        let err = ProfileField::new("lastname", Some("x".repeat(101))).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().starts_with("lastname"));
    }

    #[test]
    fn test_control_characters_rejected() {
        assert!(ProfileField::new("phone", Some("555\u{0}1234".into())).is_err());
    }
}
