use bastion_core::{RefreshSessionStore, RefreshSessionStoreError, TokenPair, TokenSigner, UserStore};

use super::GenerateTokensUseCase;
use crate::error::{AuthenticationError, UnauthorizedReason};

/// Refresh-token rotation with reuse detection.
///
/// Every refresh token is single-use: presenting it consumes the stored
/// identifier and a new pair is issued. Presenting a rotated-out token while a
/// newer one is stored is treated as theft; the principal's session is revoked
/// and the call fails with [`UnauthorizedReason::RefreshTokenReused`].
pub struct RefreshTokensUseCase<'a, U, S, T>
where
    U: UserStore,
    S: RefreshSessionStore,
    T: TokenSigner,
{
    user_store: &'a U,
    sessions: &'a S,
    signer: &'a T,
}

impl<'a, U, S, T> RefreshTokensUseCase<'a, U, S, T>
where
    U: UserStore,
    S: RefreshSessionStore,
    T: TokenSigner,
{
    pub fn new(user_store: &'a U, sessions: &'a S, signer: &'a T) -> Self {
        Self {
            user_store,
            sessions,
            signer,
        }
    }

    #[tracing::instrument(name = "RefreshTokensUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<TokenPair, AuthenticationError> {
        let claims = self
            .signer
            .verify_refresh_token(refresh_token)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token failed verification");
                AuthenticationError::Unauthorized(UnauthorizedReason::InvalidToken)
            })?;

        let Some(user) = self.user_store.find_by_id(claims.sub).await? else {
            tracing::warn!(user_id = %claims.sub, "Refresh token subject no longer exists");
            return Err(AuthenticationError::Unauthorized(
                UnauthorizedReason::UnknownSubject,
            ));
        };

        match self.sessions.consume(user.id(), &claims.refresh_token_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(user_id = %user.id(), "No refresh session on record");
                return Err(AuthenticationError::Unauthorized(
                    UnauthorizedReason::StaleRefreshToken,
                ));
            }
            Err(RefreshSessionStoreError::InvalidatedRefreshToken) => {
                tracing::warn!(user_id = %user.id(), "Refresh token reuse detected, revoking session");
                self.sessions.invalidate(user.id()).await?;
                return Err(AuthenticationError::Unauthorized(
                    UnauthorizedReason::RefreshTokenReused,
                ));
            }
            Err(e) => return Err(e.into()),
        }

        GenerateTokensUseCase::new(self.sessions, self.signer)
            .execute(&user)
            .await
    }
}
