use std::fmt;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Permission, Role, User, UserId};

/// Opaque identifier embedded in a refresh token; the refresh-session store
/// remembers the latest one per principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshTokenId(String);

impl RefreshTokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RefreshTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for RefreshTokenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RefreshTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Claims carried by an access token and attached to every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveUserData {
    pub sub: UserId,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<Permission>,
}

impl From<&User> for ActiveUserData {
    fn from(user: &User) -> Self {
        Self {
            sub: user.id(),
            email: user.email().as_ref().expose_secret().clone(),
            role: user.role(),
            permissions: user.permissions().to_vec(),
        }
    }
}

/// Claims carried by a refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenData {
    pub sub: UserId,
    #[serde(rename = "refreshTokenId")]
    pub refresh_token_id: RefreshTokenId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
