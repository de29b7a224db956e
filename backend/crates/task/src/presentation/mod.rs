//! Presentation Layer - HTTP handlers and routing
//!
//! This layer contains:
//! - DTOs for request/response
//! - HTTP handlers
//! - Router configuration

pub mod dto;
pub mod handlers;
pub mod router;
