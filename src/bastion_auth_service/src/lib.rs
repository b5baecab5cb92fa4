//! Runnable Bastion service: router assembly, HTTP tracing and the helpers
//! that open the PostgreSQL and Redis connections.

pub mod auth_service;
pub mod helpers;
pub mod tracing;

pub use auth_service::{AUTHENTICATION_GROUP, AuthService, operations};
