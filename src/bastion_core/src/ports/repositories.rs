use async_trait::async_trait;
use thiserror::Error;

use uuid::Uuid;

use crate::domain::{
    api_key::{ApiKey, NewApiKey},
    email::Email,
    tfa_secret::TfaSecret,
    tokens::RefreshTokenId,
    user::{NewUser, User, UserId},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;
    /// Persists a new principal. Fails with `UserAlreadyExists` when the e-mail is taken.
    async fn save(&self, user: NewUser) -> Result<User, UserStoreError>;
    async fn update_tfa_fields(
        &self,
        id: UserId,
        secret: Option<TfaSecret>,
        enabled: bool,
    ) -> Result<(), UserStoreError>;
}

// RefreshSessionStore port trait and errors
#[derive(Debug, Error)]
pub enum RefreshSessionStoreError {
    /// A session exists for the principal but under a different identifier:
    /// a rotated-out refresh token was presented again.
    #[error("Refresh token has been invalidated")]
    InvalidatedRefreshToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for RefreshSessionStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::InvalidatedRefreshToken, Self::InvalidatedRefreshToken)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Remembers the single currently valid refresh-token identifier per principal.
///
/// Implementations must be shared across service instances and make
/// [`consume`](RefreshSessionStore::consume) atomic per principal.
#[async_trait]
pub trait RefreshSessionStore: Send + Sync {
    /// Stores the identifier, replacing any previous one for the principal.
    async fn insert(
        &self,
        user_id: UserId,
        token_id: RefreshTokenId,
    ) -> Result<(), RefreshSessionStoreError>;

    /// `Ok(true)` on match, `Ok(false)` when no session exists,
    /// `Err(InvalidatedRefreshToken)` when a different identifier is stored.
    async fn validate(
        &self,
        user_id: UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshSessionStoreError>;

    /// Same outcomes as [`validate`](RefreshSessionStore::validate), but a match
    /// also deletes the session in the same atomic step.
    async fn consume(
        &self,
        user_id: UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshSessionStoreError>;

    /// Deletes the session. Idempotent.
    async fn invalidate(&self, user_id: UserId) -> Result<(), RefreshSessionStoreError>;
}

// ApiKeyStore port trait and errors
#[derive(Debug, Error)]
pub enum ApiKeyStoreError {
    #[error("Key owner not found")]
    OwnerNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ApiKeyStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::OwnerNotFound, Self::OwnerNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    async fn save(&self, key: NewApiKey) -> Result<ApiKey, ApiKeyStoreError>;
    /// Looks a key up by the public uuid embedded in its plaintext form.
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<ApiKey>, ApiKeyStoreError>;
}
