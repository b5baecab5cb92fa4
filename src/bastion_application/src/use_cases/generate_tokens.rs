use bastion_core::{
    ActiveUserData, RefreshSessionStore, RefreshTokenData, RefreshTokenId, TokenPair, TokenSigner,
    User,
};

use crate::error::AuthenticationError;

/// Issues an access/refresh token pair and installs the refresh identifier as
/// the principal's only valid one.
pub struct GenerateTokensUseCase<'a, S, T>
where
    S: RefreshSessionStore,
    T: TokenSigner,
{
    sessions: &'a S,
    signer: &'a T,
}

impl<'a, S, T> GenerateTokensUseCase<'a, S, T>
where
    S: RefreshSessionStore,
    T: TokenSigner,
{
    pub fn new(sessions: &'a S, signer: &'a T) -> Self {
        Self { sessions, signer }
    }

    /// Both tokens are signed concurrently. The session is written only after
    /// both signatures succeed, so a failure never leaves a half-issued pair.
    #[tracing::instrument(name = "GenerateTokensUseCase::execute", skip_all, fields(user_id = %user.id()))]
    pub async fn execute(&self, user: &User) -> Result<TokenPair, AuthenticationError> {
        let refresh_token_id = RefreshTokenId::new();
        let access_claims = ActiveUserData::from(user);
        let refresh_claims = RefreshTokenData {
            sub: user.id(),
            refresh_token_id: refresh_token_id.clone(),
        };

        let (access_token, refresh_token) = tokio::try_join!(
            self.signer.sign_access_token(&access_claims),
            self.signer.sign_refresh_token(&refresh_claims),
        )?;

        self.sessions.insert(user.id(), refresh_token_id).await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
