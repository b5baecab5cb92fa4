use bastion_core::{
    ActiveUserData, CredentialHasher, Email, Password, RefreshSessionStore, TokenPair, TokenSigner,
    User, UserId, UserStore,
};

use crate::{
    decoy::DecoyHash,
    error::{AuthenticationError, UnauthorizedReason},
    otp::TotpAuthenticator,
    use_cases::{
        GenerateTokensUseCase, RefreshTokensUseCase, SignInUseCase, SignOutUseCase, SignUpUseCase,
    },
};

/// Entry point for credential and token operations. Owns its ports and hands
/// borrowed views of them to the individual use cases.
pub struct AuthenticationService<U, H, S, T>
where
    U: UserStore,
    H: CredentialHasher,
    S: RefreshSessionStore,
    T: TokenSigner,
{
    user_store: U,
    hasher: H,
    sessions: S,
    signer: T,
    totp: TotpAuthenticator,
    decoy: DecoyHash,
}

impl<U, H, S, T> AuthenticationService<U, H, S, T>
where
    U: UserStore,
    H: CredentialHasher,
    S: RefreshSessionStore,
    T: TokenSigner,
{
    pub fn new(user_store: U, hasher: H, sessions: S, signer: T, totp: TotpAuthenticator) -> Self {
        Self {
            user_store,
            hasher,
            sessions,
            signer,
            totp,
            decoy: DecoyHash::new(),
        }
    }

    pub fn user_store(&self) -> &U {
        &self.user_store
    }

    pub async fn sign_up(&self, email: Email, password: Password) -> Result<User, AuthenticationError> {
        SignUpUseCase::new(&self.user_store, &self.hasher)
            .execute(email, password)
            .await
    }

    /// `tfa_code` is only consulted for principals with TFA enabled.
    pub async fn sign_in(
        &self,
        email: Email,
        password: Password,
        tfa_code: Option<&str>,
    ) -> Result<TokenPair, AuthenticationError> {
        SignInUseCase::new(
            &self.user_store,
            &self.hasher,
            &self.decoy,
            &self.totp,
            GenerateTokensUseCase::new(&self.sessions, &self.signer),
        )
        .execute(email, password, tfa_code)
        .await
    }

    pub async fn generate_tokens(&self, user: &User) -> Result<TokenPair, AuthenticationError> {
        GenerateTokensUseCase::new(&self.sessions, &self.signer)
            .execute(user)
            .await
    }

    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AuthenticationError> {
        RefreshTokensUseCase::new(&self.user_store, &self.sessions, &self.signer)
            .execute(refresh_token)
            .await
    }

    pub async fn sign_out(&self, user_id: UserId) -> Result<(), AuthenticationError> {
        SignOutUseCase::new(&self.sessions).execute(user_id).await
    }

    /// Verifies a bearer access token and returns its claims.
    #[tracing::instrument(name = "AuthenticationService::verify_access_token", skip_all)]
    pub async fn verify_access_token(&self, token: &str) -> Result<ActiveUserData, AuthenticationError> {
        self.signer.verify_access_token(token).await.map_err(|e| {
            tracing::debug!(error = %e, "Access token failed verification");
            AuthenticationError::Unauthorized(UnauthorizedReason::InvalidToken)
        })
    }
}
