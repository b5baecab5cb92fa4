use bastion_core::{ActiveUserData, ApiKeyStore, CredentialHasher, Password, PlainApiKey, UserStore};
use secrecy::Secret;

use crate::{
    decoy::DecoyHash,
    error::{AuthenticationError, UnauthorizedReason},
};

/// Resolves a presented API key to the claims of the principal owning it.
pub struct ValidateApiKeyUseCase<'a, U, H, K>
where
    U: UserStore,
    H: CredentialHasher,
    K: ApiKeyStore,
{
    user_store: &'a U,
    hasher: &'a H,
    api_keys: &'a K,
    decoy: &'a DecoyHash,
}

impl<'a, U, H, K> ValidateApiKeyUseCase<'a, U, H, K>
where
    U: UserStore,
    H: CredentialHasher,
    K: ApiKeyStore,
{
    pub fn new(user_store: &'a U, hasher: &'a H, api_keys: &'a K, decoy: &'a DecoyHash) -> Self {
        Self {
            user_store,
            hasher,
            api_keys,
            decoy,
        }
    }

    #[tracing::instrument(name = "ValidateApiKeyUseCase::execute", skip_all)]
    pub async fn execute(&self, raw_key: &str) -> Result<ActiveUserData, AuthenticationError> {
        let key = PlainApiKey::try_from(Secret::from(raw_key.to_owned()))
            .map_err(|_| invalid_api_key())?;
        let presented = Password::from(&key);

        let Some(stored) = self.api_keys.find_by_uuid(&key.uuid()).await? else {
            self.decoy.compare(self.hasher, &presented).await;
            return Err(invalid_api_key());
        };

        if !self.hasher.compare(&presented, stored.key_hash()).await? {
            tracing::warn!(api_key_id = %stored.id(), "API key secret mismatch");
            return Err(invalid_api_key());
        }

        let user = self
            .user_store
            .find_by_id(stored.user_id())
            .await?
            .ok_or(AuthenticationError::Unauthorized(
                UnauthorizedReason::UnknownSubject,
            ))?;

        Ok(ActiveUserData::from(&user))
    }
}

fn invalid_api_key() -> AuthenticationError {
    AuthenticationError::Unauthorized(UnauthorizedReason::InvalidApiKey)
}
