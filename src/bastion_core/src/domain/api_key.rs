use std::fmt;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{password::PasswordHash, user::UserId};

const SEPARATOR: char = '.';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiKeyError {
    #[error("Malformed API key")]
    Malformed,
}

/// Storage-assigned identifier of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(i64);

impl ApiKeyId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plaintext key in the `<uuid>.<secret>` form. Shown to its owner once;
/// only the hash is stored.
#[derive(Debug, Clone)]
pub struct PlainApiKey {
    uuid: Uuid,
    key: Secret<String>,
}

impl PlainApiKey {
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4();
        let secret = Uuid::new_v4().simple();
        Self {
            uuid,
            key: Secret::new(format!("{uuid}{SEPARATOR}{secret}")),
        }
    }

    /// Public lookup handle embedded in the key.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl TryFrom<Secret<String>> for PlainApiKey {
    type Error = ApiKeyError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let (uuid, secret) = value
            .expose_secret()
            .split_once(SEPARATOR)
            .ok_or(ApiKeyError::Malformed)?;
        if secret.is_empty() {
            return Err(ApiKeyError::Malformed);
        }
        let uuid = Uuid::parse_str(uuid).map_err(|_| ApiKeyError::Malformed)?;
        Ok(Self { uuid, key: value })
    }
}

impl AsRef<Secret<String>> for PlainApiKey {
    fn as_ref(&self) -> &Secret<String> {
        &self.key
    }
}

/// An API key as persisted by the key store.
#[derive(Debug, Clone)]
pub struct ApiKey {
    id: ApiKeyId,
    key_hash: PasswordHash,
    uuid: Uuid,
    user_id: UserId,
}

impl ApiKey {
    pub fn new(id: ApiKeyId, key_hash: PasswordHash, uuid: Uuid, user_id: UserId) -> Self {
        Self {
            id,
            key_hash,
            uuid,
            user_id,
        }
    }

    pub fn id(&self) -> ApiKeyId {
        self.id
    }

    pub fn key_hash(&self) -> &PasswordHash {
        &self.key_hash
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// What key creation hands to the key store; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub key_hash: PasswordHash,
    pub uuid: Uuid,
    pub user_id: UserId,
}

impl NewApiKey {
    pub fn into_api_key(self, id: ApiKeyId) -> ApiKey {
        ApiKey::new(id, self.key_hash, self.uuid, self.user_id)
    }
}
