use secrecy::{ExposeSecret, Secret};

use super::{api_key::PlainApiKey, user::UserError};

/// Plaintext password as submitted by a caller.
///
/// Strength rules belong to the request boundary; here we only refuse empty input.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().is_empty() {
            return Err(UserError::InvalidPassword);
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// API keys go through the same hasher as passwords.
impl From<&PlainApiKey> for Password {
    fn from(key: &PlainApiKey) -> Self {
        Self(key.as_ref().clone())
    }
}

/// One-way hashed form of a [`Password`], produced by a `CredentialHasher`.
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(hash: Secret<String>) -> Self {
        Self(hash)
    }
}

impl AsRef<Secret<String>> for PasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
