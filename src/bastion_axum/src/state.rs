use std::sync::Arc;

use bastion_application::{ApiKeyService, AuthenticationService, OtpAuthenticationService};
use bastion_core::{ApiKeyStore, CredentialHasher, RefreshSessionStore, TokenSigner, UserStore};

/// Shared application services. Cloning only bumps reference counts.
pub struct AppState<U, H, S, T, K>
where
    U: UserStore,
    H: CredentialHasher,
    S: RefreshSessionStore,
    T: TokenSigner,
    K: ApiKeyStore,
{
    pub authentication: Arc<AuthenticationService<U, H, S, T>>,
    pub otp: Arc<OtpAuthenticationService<U>>,
    pub api_keys: Arc<ApiKeyService<U, H, K>>,
}

impl<U, H, S, T, K> AppState<U, H, S, T, K>
where
    U: UserStore,
    H: CredentialHasher,
    S: RefreshSessionStore,
    T: TokenSigner,
    K: ApiKeyStore,
{
    pub fn new(
        authentication: AuthenticationService<U, H, S, T>,
        otp: OtpAuthenticationService<U>,
        api_keys: ApiKeyService<U, H, K>,
    ) -> Self {
        Self {
            authentication: Arc::new(authentication),
            otp: Arc::new(otp),
            api_keys: Arc::new(api_keys),
        }
    }
}

impl<U, H, S, T, K> Clone for AppState<U, H, S, T, K>
where
    U: UserStore,
    H: CredentialHasher,
    S: RefreshSessionStore,
    T: TokenSigner,
    K: ApiKeyStore,
{
    fn clone(&self) -> Self {
        Self {
            authentication: Arc::clone(&self.authentication),
            otp: Arc::clone(&self.otp),
            api_keys: Arc::clone(&self.api_keys),
        }
    }
}
