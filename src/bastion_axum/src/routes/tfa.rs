use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use bastion_core::{
    ActiveUserData, ApiKeyStore, CredentialHasher, Email, RefreshSessionStore, TokenSigner,
    UserStore,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::{error::AuthApiError, extractors::ActiveUser, state::AppState};

#[derive(Deserialize)]
pub struct ConfirmTfaRequest {
    pub code: Secret<String>,
}

/// Starts enrollment and answers with the provisioning URI rendered as a PNG
/// QR code for an authenticator app.
#[tracing::instrument(name = "Generate TFA QR code", skip_all, fields(user_id = %user.sub))]
pub async fn generate_tfa_qr_code<U, H, S, T, K>(
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
    let email = principal_email(&user)?;

    let generated = state.otp.begin_enrollment(&email).await?;
    let png = state
        .otp
        .provisioning_qr_png(generated.provisioning_uri.expose_secret())?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

#[tracing::instrument(name = "Confirm TFA enrollment", skip_all, fields(user_id = %user.sub))]
pub async fn confirm_tfa<U, H, S, T, K>(
    State(state): State<AppState<U, H, S, T, K>>,
    ActiveUser(user): ActiveUser,
    Json(request): Json<ConfirmTfaRequest>,
) -> Result<StatusCode, AuthApiError>
where
    U: UserStore + 'static,
    H: CredentialHasher + 'static,
    S: RefreshSessionStore + 'static,
    T: TokenSigner + 'static,
    K: ApiKeyStore + 'static,
{
    let email = principal_email(&user)?;

    state
        .otp
        .confirm_enrollment(&email, request.code.expose_secret())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// Access tokens are only minted for validated addresses
fn principal_email(user: &ActiveUserData) -> Result<Email, AuthApiError> {
    Email::try_from(Secret::from(user.email.clone()))
        .map_err(|_| AuthApiError::Unauthorized("Unauthorized".to_owned()))
}
