use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    password::{Password, PasswordHash},
    tokens::{ActiveUserData, RefreshTokenData},
};

#[derive(Debug, Error)]
#[error("Hashing failed: {0}")]
pub struct HasherError(pub String);

/// One-way password hashing.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError>;

    /// Verifies `password` against `hash` with the algorithm's constant-effort
    /// comparison. A mismatch is `Ok(false)`, not an error.
    async fn compare(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HasherError>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}

/// Signs and verifies time-boxed claim sets with a fixed audience and issuer.
#[async_trait]
pub trait TokenSigner: Send + Sync {
    async fn sign_access_token(&self, data: &ActiveUserData) -> Result<String, TokenError>;
    async fn sign_refresh_token(&self, data: &RefreshTokenData) -> Result<String, TokenError>;
    async fn verify_access_token(&self, token: &str) -> Result<ActiveUserData, TokenError>;
    async fn verify_refresh_token(&self, token: &str) -> Result<RefreshTokenData, TokenError>;
}
