use std::fmt;

use bastion_core::{
    ApiKeyStoreError, HasherError, RefreshSessionStoreError, TokenError, UserStoreError,
};
use thiserror::Error;

/// Why a caller was refused. Kept for logs and tests; the outward message is
/// the same for every reason except a reused refresh token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    UnknownUser,
    PasswordMismatch,
    InvalidTfaCode,
    InvalidToken,
    UnknownSubject,
    StaleRefreshToken,
    RefreshTokenReused,
    InvalidApiKey,
}

impl UnauthorizedReason {
    /// Reuse of a rotated-out refresh token is flagged so callers can react
    /// (e.g. force re-authentication everywhere).
    pub fn is_access_denied(&self) -> bool {
        matches!(self, UnauthorizedReason::RefreshTokenReused)
    }
}

impl fmt::Display for UnauthorizedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_access_denied() {
            f.write_str("Access denied")
        } else {
            f.write_str("Unauthorized")
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("User already exists")]
    Conflict,
    #[error("{0}")]
    Unauthorized(UnauthorizedReason),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AuthenticationError {
    pub fn unauthorized_reason(&self) -> Option<UnauthorizedReason> {
        match self {
            AuthenticationError::Unauthorized(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<UserStoreError> for AuthenticationError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => AuthenticationError::Conflict,
            other => AuthenticationError::Persistence(other.to_string()),
        }
    }
}

impl From<RefreshSessionStoreError> for AuthenticationError {
    fn from(error: RefreshSessionStoreError) -> Self {
        AuthenticationError::Persistence(error.to_string())
    }
}

impl From<ApiKeyStoreError> for AuthenticationError {
    fn from(error: ApiKeyStoreError) -> Self {
        match error {
            ApiKeyStoreError::OwnerNotFound => {
                AuthenticationError::Unauthorized(UnauthorizedReason::UnknownSubject)
            }
            other => AuthenticationError::Persistence(other.to_string()),
        }
    }
}

impl From<HasherError> for AuthenticationError {
    fn from(error: HasherError) -> Self {
        AuthenticationError::Unexpected(error.to_string())
    }
}

impl From<TokenError> for AuthenticationError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::InvalidToken(_) => {
                AuthenticationError::Unauthorized(UnauthorizedReason::InvalidToken)
            }
            TokenError::SigningFailed(e) => AuthenticationError::Unexpected(e),
        }
    }
}
