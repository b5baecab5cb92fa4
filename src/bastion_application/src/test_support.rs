//! In-memory doubles for the core ports, shared by the unit tests of this crate.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicI64, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use bastion_core::{
    ActiveUserData, ApiKey, ApiKeyId, ApiKeyStore, ApiKeyStoreError, CredentialHasher, Email,
    HasherError, NewApiKey, NewUser, Password, PasswordHash, RefreshSessionStore,
    RefreshSessionStoreError, RefreshTokenData, RefreshTokenId, TfaSecret, TokenError,
    TokenSigner, User, UserId, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_owned())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_owned())).unwrap()
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    next_id: Arc<AtomicI64>,
}

impl MockUserStore {
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email() == &user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let user = user.into_user(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_tfa_fields(
        &self,
        id: UserId,
        secret: Option<TfaSecret>,
        enabled: bool,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.remove(&id).ok_or(UserStoreError::UserNotFound)?;
        users.insert(id, user.with_tfa(secret, enabled));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockSessionStore {
    sessions: Arc<Mutex<HashMap<UserId, RefreshTokenId>>>,
}

impl MockSessionStore {
    pub async fn current(&self, user_id: UserId) -> Option<RefreshTokenId> {
        self.sessions.lock().await.get(&user_id).cloned()
    }
}

#[async_trait]
impl RefreshSessionStore for MockSessionStore {
    async fn insert(
        &self,
        user_id: UserId,
        token_id: RefreshTokenId,
    ) -> Result<(), RefreshSessionStoreError> {
        self.sessions.lock().await.insert(user_id, token_id);
        Ok(())
    }

    async fn validate(
        &self,
        user_id: UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshSessionStoreError> {
        match self.sessions.lock().await.get(&user_id) {
            None => Ok(false),
            Some(stored) if stored == token_id => Ok(true),
            Some(_) => Err(RefreshSessionStoreError::InvalidatedRefreshToken),
        }
    }

    async fn consume(
        &self,
        user_id: UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshSessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(&user_id) {
            None => Ok(false),
            Some(stored) if stored == token_id => {
                sessions.remove(&user_id);
                Ok(true)
            }
            Some(_) => Err(RefreshSessionStoreError::InvalidatedRefreshToken),
        }
    }

    async fn invalidate(&self, user_id: UserId) -> Result<(), RefreshSessionStoreError> {
        self.sessions.lock().await.remove(&user_id);
        Ok(())
    }
}

/// Produces `hashed(<plaintext>)`; good enough to tell hashes from passwords.
#[derive(Clone, Default)]
pub struct PlainHasher;

#[async_trait]
impl CredentialHasher for PlainHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError> {
        Ok(PasswordHash::new(Secret::from(format!(
            "hashed({})",
            password.as_ref().expose_secret()
        ))))
    }

    async fn compare(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HasherError> {
        let expected = self.hash(password).await?;
        Ok(expected.as_ref().expose_secret() == hash.as_ref().expose_secret())
    }
}

/// [`PlainHasher`] that counts how often each operation runs.
#[derive(Clone, Default)]
pub struct CountingHasher {
    hashes: Arc<AtomicUsize>,
    compares: Arc<AtomicUsize>,
}

impl CountingHasher {
    pub fn hashes(&self) -> usize {
        self.hashes.load(Ordering::SeqCst)
    }

    pub fn compares(&self) -> usize {
        self.compares.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialHasher for CountingHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        PlainHasher.hash(password).await
    }

    async fn compare(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HasherError> {
        self.compares.fetch_add(1, Ordering::SeqCst);
        PlainHasher.compare(password, hash).await
    }
}

#[derive(Clone, Default)]
pub struct MockApiKeyStore {
    keys: Arc<RwLock<HashMap<Uuid, ApiKey>>>,
    next_id: Arc<AtomicI64>,
}

#[async_trait]
impl ApiKeyStore for MockApiKeyStore {
    async fn save(&self, key: NewApiKey) -> Result<ApiKey, ApiKeyStoreError> {
        let id = ApiKeyId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let key = key.into_api_key(id);
        self.keys.write().await.insert(key.uuid(), key.clone());
        Ok(key)
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<ApiKey>, ApiKeyStoreError> {
        Ok(self.keys.read().await.get(uuid).cloned())
    }
}

/// Unsigned JSON tokens prefixed with their kind.
#[derive(Clone, Default)]
pub struct JsonTokenSigner;

const ACCESS_PREFIX: &str = "access.";
const REFRESH_PREFIX: &str = "refresh.";

#[async_trait]
impl TokenSigner for JsonTokenSigner {
    async fn sign_access_token(&self, data: &ActiveUserData) -> Result<String, TokenError> {
        let body = serde_json::to_string(data).map_err(|e| TokenError::SigningFailed(e.to_string()))?;
        Ok(format!("{ACCESS_PREFIX}{body}"))
    }

    async fn sign_refresh_token(&self, data: &RefreshTokenData) -> Result<String, TokenError> {
        let body = serde_json::to_string(data).map_err(|e| TokenError::SigningFailed(e.to_string()))?;
        Ok(format!("{REFRESH_PREFIX}{body}"))
    }

    async fn verify_access_token(&self, token: &str) -> Result<ActiveUserData, TokenError> {
        let body = token
            .strip_prefix(ACCESS_PREFIX)
            .ok_or_else(|| TokenError::InvalidToken("not an access token".to_owned()))?;
        serde_json::from_str(body).map_err(|e| TokenError::InvalidToken(e.to_string()))
    }

    async fn verify_refresh_token(&self, token: &str) -> Result<RefreshTokenData, TokenError> {
        let body = token
            .strip_prefix(REFRESH_PREFIX)
            .ok_or_else(|| TokenError::InvalidToken("not a refresh token".to_owned()))?;
        serde_json::from_str(body).map_err(|e| TokenError::InvalidToken(e.to_string()))
    }
}
