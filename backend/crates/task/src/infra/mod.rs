//! Infrastructure Layer
//!
//! Repository implementations.

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod postgres;
