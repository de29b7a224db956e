//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id on the blocking pool, bounded concurrency)
//! - Cookie rendering and parsing
//! - OS randomness

pub mod cookie;
pub mod crypto;
pub mod password;
