//! Authorization policy vocabulary.
//!
//! A [`Policy`] is a declarative rule attached to a protected operation. Each
//! policy has a [`PolicyKind`], and exactly one [`PolicyHandler`] is registered
//! per kind. Handlers are looked up by kind, never by inspecting the policy's
//! parameters.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    tokens::ActiveUserData,
    user::{Permission, Role},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// The principal must hold this role.
    Role(Role),
    /// The principal must hold this permission.
    Permission(Permission),
    /// The principal's e-mail address must belong to this domain.
    EmailDomain(String),
}

impl Policy {
    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Role(_) => PolicyKind::Role,
            Policy::Permission(_) => PolicyKind::Permission,
            Policy::EmailDomain(_) => PolicyKind::EmailDomain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Role,
    Permission,
    EmailDomain,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::Role => "role",
            PolicyKind::Permission => "permission",
            PolicyKind::EmailDomain => "email-domain",
        };
        f.write_str(name)
    }
}

/// Raised by a handler that refuses a principal. The message is surfaced to
/// the caller as the reason for the denial.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct PolicyDenied(pub String);

impl PolicyDenied {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[async_trait]
pub trait PolicyHandler: Send + Sync {
    /// The single policy kind this handler evaluates.
    fn kind(&self) -> PolicyKind;

    async fn handle(&self, policy: &Policy, user: &ActiveUserData) -> Result<(), PolicyDenied>;
}
