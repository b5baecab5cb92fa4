use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use bastion_core::{ApiKeyStore, CredentialHasher, RefreshSessionStore, TokenSigner, UserStore};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{error::AuthApiError, extractors::ActiveUser, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyResponse {
    /// Only ever returned here; the service keeps a hash.
    pub api_key: String,
}

#[tracing::instrument(name = "Create API key", skip_all, fields(user_id = %user.sub))]
pub async fn create_api_key<U, H, S, T, K>(
    State(state): State<AppState<U, H, S, T, K>>,
    ActiveUser(user): ActiveUser,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + 'static,
    H: CredentialHasher + 'static,
    S: RefreshSessionStore + 'static,
    T: TokenSigner + 'static,
    K: ApiKeyStore + 'static,
{
    let key = state.api_keys.create(user.sub).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateApiKeyResponse {
            api_key: key.as_ref().expose_secret().clone(),
        }),
    ))
}
