use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use bastion_core::{ApiKeyStore, CredentialHasher, RefreshSessionStore, TokenSigner, UserStore};

use crate::{error::AuthApiError, state::AppState};

const BEARER_SCHEME: &str = "Bearer";
const API_KEY_SCHEME: &str = "ApiKey";

#[derive(Debug, PartialEq, Eq)]
enum Credentials<'a> {
    Bearer(&'a str),
    ApiKey(&'a str),
}

/// Accepts `Authorization: Bearer <jwt>` or `Authorization: ApiKey <key>` and
/// attaches the resulting [`ActiveUserData`](bastion_core::ActiveUserData) to
/// the request. Scheme names are matched case-insensitively.
#[tracing::instrument(name = "Authenticate", skip_all)]
pub async fn authenticate<U, H, S, T, K>(
    State(state): State<AppState<U, H, S, T, K>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthApiError>
where
    U: UserStore + 'static,
    H: CredentialHasher + 'static,
    S: RefreshSessionStore + 'static,
    T: TokenSigner + 'static,
    K: ApiKeyStore + 'static,
{
    let presented = credentials(&request).ok_or(AuthApiError::MissingToken)?;
    let user = match presented {
        Credentials::Bearer(token) => state.authentication.verify_access_token(token).await?,
        Credentials::ApiKey(key) => state.api_keys.validate(key).await?,
    };
    tracing::debug!(user_id = %user.sub, "Caller authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn credentials(request: &Request) -> Option<Credentials<'_>> {
    let (scheme, value) = request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        Some(Credentials::Bearer(value))
    } else if scheme.eq_ignore_ascii_case(API_KEY_SCHEME) {
        Some(Credentials::ApiKey(value))
    } else {
        None
    }
}
