//! Value Object Module

pub mod email;
pub mod profile_field;
pub mod user_password;
