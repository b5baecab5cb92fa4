use axum::{extract::FromRequestParts, http::request::Parts};
use bastion_core::ActiveUserData;

use crate::error::AuthApiError;

/// The principal attached by [`authenticate`](crate::middleware::authenticate).
///
/// Rejects with 401 when the route is not behind the authentication layer or
/// the request carried no valid access token.
#[derive(Debug, Clone)]
pub struct ActiveUser(pub ActiveUserData);

impl<S> FromRequestParts<S> for ActiveUser
where
    S: Send + Sync,
{
    type Rejection = AuthApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActiveUserData>()
            .cloned()
            .map(ActiveUser)
            .ok_or(AuthApiError::MissingToken)
    }
}
