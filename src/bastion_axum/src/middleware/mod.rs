mod authentication;
mod policies;

pub use authentication::authenticate;
pub use policies::{PolicyScope, enforce_policies};
