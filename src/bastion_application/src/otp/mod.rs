mod service;
mod totp;

pub use service::OtpAuthenticationService;
pub use totp::{GeneratedSecret, TotpAuthenticator, TotpConfig};

use bastion_core::UserStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OtpError {
    #[error("User not found")]
    NotFound,
    #[error("Invalid two-factor code")]
    InvalidCode,
    #[error("Two-factor enrollment has not been started")]
    NotEnrolled,
    #[error("Two-factor authentication is already enabled")]
    AlreadyEnabled,
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Invalid TOTP configuration: {0}")]
    InvalidConfig(String),
    #[error("TOTP error: {0}")]
    Totp(String),
}

impl From<UserStoreError> for OtpError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => OtpError::NotFound,
            other => OtpError::Persistence(other.to_string()),
        }
    }
}
