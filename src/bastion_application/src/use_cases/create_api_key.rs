use bastion_core::{ApiKeyStore, CredentialHasher, NewApiKey, Password, PlainApiKey, UserId, UserStore};

use crate::error::{AuthenticationError, UnauthorizedReason};

/// Issues an API key for an existing principal. Only the hash is stored; the
/// plaintext is returned to the caller once.
pub struct CreateApiKeyUseCase<'a, U, H, K>
where
    U: UserStore,
    H: CredentialHasher,
    K: ApiKeyStore,
{
    user_store: &'a U,
    hasher: &'a H,
    api_keys: &'a K,
}

impl<'a, U, H, K> CreateApiKeyUseCase<'a, U, H, K>
where
    U: UserStore,
    H: CredentialHasher,
    K: ApiKeyStore,
{
    pub fn new(user_store: &'a U, hasher: &'a H, api_keys: &'a K) -> Self {
        Self {
            user_store,
            hasher,
            api_keys,
        }
    }

    #[tracing::instrument(name = "CreateApiKeyUseCase::execute", skip_all)]
    pub async fn execute(&self, user_id: UserId) -> Result<PlainApiKey, AuthenticationError> {
        if self.user_store.find_by_id(user_id).await?.is_none() {
            return Err(AuthenticationError::Unauthorized(
                UnauthorizedReason::UnknownSubject,
            ));
        }

        let key = PlainApiKey::generate();
        let key_hash = self.hasher.hash(&Password::from(&key)).await?;
        let stored = self
            .api_keys
            .save(NewApiKey {
                key_hash,
                uuid: key.uuid(),
                user_id,
            })
            .await?;

        tracing::info!(%user_id, api_key_id = %stored.id(), "API key created");
        Ok(key)
    }
}
