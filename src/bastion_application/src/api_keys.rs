use bastion_core::{ActiveUserData, ApiKeyStore, CredentialHasher, PlainApiKey, UserId, UserStore};

use crate::{
    decoy::DecoyHash,
    error::AuthenticationError,
    use_cases::{CreateApiKeyUseCase, ValidateApiKeyUseCase},
};

/// Issues and checks long-lived API keys, the alternative to bearer tokens
/// for machine clients.
pub struct ApiKeyService<U, H, K>
where
    U: UserStore,
    H: CredentialHasher,
    K: ApiKeyStore,
{
    user_store: U,
    hasher: H,
    api_keys: K,
    decoy: DecoyHash,
}

impl<U, H, K> ApiKeyService<U, H, K>
where
    U: UserStore,
    H: CredentialHasher,
    K: ApiKeyStore,
{
    pub fn new(user_store: U, hasher: H, api_keys: K) -> Self {
        Self {
            user_store,
            hasher,
            api_keys,
            decoy: DecoyHash::new(),
        }
    }

    pub fn api_keys(&self) -> &K {
        &self.api_keys
    }

    pub async fn create(&self, user_id: UserId) -> Result<PlainApiKey, AuthenticationError> {
        CreateApiKeyUseCase::new(&self.user_store, &self.hasher, &self.api_keys)
            .execute(user_id)
            .await
    }

    pub async fn validate(&self, raw_key: &str) -> Result<ActiveUserData, AuthenticationError> {
        ValidateApiKeyUseCase::new(&self.user_store, &self.hasher, &self.api_keys, &self.decoy)
            .execute(raw_key)
            .await
    }
}
