use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bastion_application::{AuthenticationError, AuthorizationError, OtpError};
use bastion_core::UserError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing token")]
    MissingToken,

    #[error("{0}")]
    Unauthorized(String),

    /// A revoked refresh token was presented again.
    #[error("Access denied")]
    AccessDenied,

    #[error("{0}")]
    Forbidden(String),

    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl AuthApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthApiError::MissingToken
            | AuthApiError::Unauthorized(_)
            | AuthApiError::AccessDenied => StatusCode::UNAUTHORIZED,
            AuthApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthApiError::NotFound => StatusCode::NOT_FOUND,
            AuthApiError::Conflict(_) => StatusCode::CONFLICT,
            AuthApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let error_message = match self {
            AuthApiError::UnexpectedError(details) => {
                tracing::error!(error = %details, "Request failed unexpectedly");
                String::from("Internal server error")
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for AuthApiError {
    fn from(error: UserError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<AuthenticationError> for AuthApiError {
    fn from(error: AuthenticationError) -> Self {
        match error {
            AuthenticationError::Conflict => AuthApiError::Conflict(error.to_string()),
            AuthenticationError::Unauthorized(reason) if reason.is_access_denied() => {
                AuthApiError::AccessDenied
            }
            AuthenticationError::Unauthorized(reason) => {
                AuthApiError::Unauthorized(reason.to_string())
            }
            AuthenticationError::Persistence(e) | AuthenticationError::Unexpected(e) => {
                AuthApiError::UnexpectedError(e)
            }
        }
    }
}

impl From<OtpError> for AuthApiError {
    fn from(error: OtpError) -> Self {
        match error {
            OtpError::NotFound => AuthApiError::NotFound,
            OtpError::InvalidCode => AuthApiError::Unauthorized(error.to_string()),
            OtpError::NotEnrolled | OtpError::AlreadyEnabled => {
                AuthApiError::Conflict(error.to_string())
            }
            OtpError::Persistence(e) | OtpError::InvalidConfig(e) | OtpError::Totp(e) => {
                AuthApiError::UnexpectedError(e)
            }
        }
    }
}

impl From<AuthorizationError> for AuthApiError {
    fn from(error: AuthorizationError) -> Self {
        match error {
            AuthorizationError::Forbidden(message) => AuthApiError::Forbidden(message),
            other => AuthApiError::UnexpectedError(other.to_string()),
        }
    }
}
