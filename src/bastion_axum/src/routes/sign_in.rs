use axum::{Json, extract::State};
use bastion_core::{
    ApiKeyStore, CredentialHasher, Email, Password, RefreshSessionStore, TokenPair, TokenSigner,
    UserStore,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::{error::AuthApiError, state::AppState};

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    /// Required only for principals with two-factor authentication enabled.
    #[serde(rename = "tfaCode", default)]
    pub tfa_code: Option<Secret<String>>,
}

#[tracing::instrument(name = "Sign in", skip_all)]
pub async fn sign_in<U, H, S, T, K>(
    State(state): State<AppState<U, H, S, T, K>>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<TokenPair>, AuthApiError>
where
    U: UserStore + 'static,
    H: CredentialHasher + 'static,
    S: RefreshSessionStore + 'static,
    T: TokenSigner + 'static,
    K: ApiKeyStore + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;
    let tfa_code = request.tfa_code.as_ref().map(|code| code.expose_secret().as_str());

    let tokens = state
        .authentication
        .sign_in(email, password, tfa_code)
        .await?;

    Ok(Json(tokens))
}
