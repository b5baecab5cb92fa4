//! Policy evaluation: handler registry, per-operation policy table and the
//! guard that ties them to an authenticated principal.

mod guard;
mod handlers;
mod operation_table;
mod registry;

pub use guard::PoliciesGuard;
pub use handlers::{EmailDomainPolicyHandler, PermissionPolicyHandler, RolePolicyHandler};
pub use operation_table::{OperationTable, OperationTableBuilder};
pub use registry::PolicyHandlerRegistry;

use bastion_core::PolicyKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// A handler refused the principal; carries the handler's message.
    #[error("{0}")]
    Forbidden(String),
    /// Policies are declared but no authenticated principal was supplied.
    #[error("Policies declared without an authenticated principal")]
    MissingPrincipal,
    #[error("No handler registered for policy kind `{0}`")]
    UnregisteredPolicy(PolicyKind),
}

/// Raised while wiring handlers and operations at start-up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyRegistryError {
    #[error("More than one handler registered for policy kind `{0}`")]
    DuplicateHandler(PolicyKind),
    #[error("Operation `{operation}` declares a `{kind}` policy but no handler is registered")]
    MissingHandler { operation: String, kind: PolicyKind },
}
