use axum::{Json, extract::State};
use bastion_core::{
    ApiKeyStore, CredentialHasher, RefreshSessionStore, TokenPair, TokenSigner, UserStore,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::{error::AuthApiError, state::AppState};

#[derive(Deserialize)]
pub struct RefreshTokensRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Secret<String>,
}

#[tracing::instrument(name = "Refresh tokens", skip_all)]
pub async fn refresh_tokens<U, H, S, T, K>(
    State(state): State<AppState<U, H, S, T, K>>,
    Json(request): Json<RefreshTokensRequest>,
) -> Result<Json<TokenPair>, AuthApiError>
where
    U: UserStore + 'static,
    H: CredentialHasher + 'static,
    S: RefreshSessionStore + 'static,
    T: TokenSigner + 'static,
    K: ApiKeyStore + 'static,
{
    let tokens = state
        .authentication
        .refresh_tokens(request.refresh_token.expose_secret())
        .await?;

    Ok(Json(tokens))
}
