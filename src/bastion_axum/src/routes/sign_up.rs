use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use bastion_core::{
    ApiKeyStore, CredentialHasher, Email, Password, RefreshSessionStore, TokenSigner, UserStore,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{error::AuthApiError, state::AppState};

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub id: i64,
}

#[tracing::instrument(name = "Sign up", skip_all)]
pub async fn sign_up<U, H, S, T, K>(
    State(state): State<AppState<U, H, S, T, K>>,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + 'static,
    H: CredentialHasher + 'static,
    S: RefreshSessionStore + 'static,
    T: TokenSigner + 'static,
    K: ApiKeyStore + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let user = state.authentication.sign_up(email, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            id: user.id().get(),
        }),
    ))
}
