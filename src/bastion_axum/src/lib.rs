//! Axum surface for the Bastion identity core.
//!
//! Handlers are thin: they parse the request into domain types, call the
//! application services held in [`AppState`], and map failures through
//! [`AuthApiError`]. Bearer authentication attaches the verified claims to the
//! request; policy enforcement reads them back explicitly.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export for convenience
pub use error::{AuthApiError, ErrorResponse};
pub use extractors::ActiveUser;
pub use middleware::{PolicyScope, authenticate, enforce_policies};
pub use state::AppState;
