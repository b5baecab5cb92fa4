pub mod api_keys;
pub mod authentication;
pub mod authorization;
pub mod decoy;
pub mod error;
pub mod otp;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use api_keys::ApiKeyService;
pub use authentication::AuthenticationService;
pub use authorization::{
    AuthorizationError, EmailDomainPolicyHandler, OperationTable, OperationTableBuilder,
    PermissionPolicyHandler, PoliciesGuard, PolicyHandlerRegistry, PolicyRegistryError,
    RolePolicyHandler,
};
pub use decoy::DecoyHash;
pub use error::{AuthenticationError, UnauthorizedReason};
pub use otp::{GeneratedSecret, OtpAuthenticationService, OtpError, TotpAuthenticator, TotpConfig};
pub use use_cases::{
    CreateApiKeyUseCase, GenerateTokensUseCase, RefreshTokensUseCase, SignInUseCase,
    SignOutUseCase, SignUpUseCase, ValidateApiKeyUseCase,
};
