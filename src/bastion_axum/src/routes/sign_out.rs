use axum::{extract::State, http::StatusCode};
use bastion_core::{ApiKeyStore, CredentialHasher, RefreshSessionStore, TokenSigner, UserStore};

use crate::{error::AuthApiError, extractors::ActiveUser, state::AppState};

/// Revokes the caller's refresh session. Outstanding access tokens stay valid
/// until they expire.
#[tracing::instrument(name = "Sign out", skip_all, fields(user_id = %user.sub))]
pub async fn sign_out<U, H, S, T, K>(
    State(state): State<AppState<U, H, S, T, K>>,
    ActiveUser(user): ActiveUser,
) -> Result<StatusCode, AuthApiError>
where
    U: UserStore + 'static,
    H: CredentialHasher + 'static,
    S: RefreshSessionStore + 'static,
    T: TokenSigner + 'static,
    K: ApiKeyStore + 'static,
{
    state.authentication.sign_out(user.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}
