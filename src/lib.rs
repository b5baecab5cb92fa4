//! # Bastion - identity and access core
//!
//! Facade crate re-exporting the public APIs of the Bastion workspace.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `ActiveUserData`, `TokenPair`, ...
//! - **Ports**: `UserStore`, `RefreshSessionStore`, `ApiKeyStore`, `CredentialHasher`, `TokenSigner`
//! - **Engines**: `AuthenticationService`, `ApiKeyService`, `OtpAuthenticationService`, `PoliciesGuard`
//! - **Adapters**: `JwtTokenSigner`, `Argon2Hasher`, in-memory/PostgreSQL/Redis stores
//! - **Service**: `AuthService`, the axum router serving `/authentication/*`
//!
//! ## Usage
//!
//! ```ignore
//! use bastion::{
//!     ApiKeyService, AppState, Argon2Hasher, AuthService, AuthenticationService,
//!     DashMapRefreshSessionStore, HashMapApiKeyStore, HashMapUserStore, JwtTokenSigner,
//!     OtpAuthenticationService, OperationTable, PoliciesGuard, PolicyHandlerRegistry,
//!     TotpAuthenticator,
//! };
//!
//! let users = HashMapUserStore::default();
//! let totp = TotpAuthenticator::default();
//! let authentication = AuthenticationService::new(
//!     users.clone(),
//!     Argon2Hasher::default(),
//!     DashMapRefreshSessionStore::default(),
//!     JwtTokenSigner::new(jwt_config),
//!     totp.clone(),
//! );
//! let api_keys = ApiKeyService::new(users.clone(), Argon2Hasher::default(), HashMapApiKeyStore::new());
//! let otp = OtpAuthenticationService::new(users, totp);
//!
//! let registry = PolicyHandlerRegistry::with_default_handlers();
//! let table = OperationTable::builder().build(&registry)?;
//! let guard = PoliciesGuard::new(Arc::new(registry), Arc::new(table));
//!
//! let router = AuthService::new(AppState::new(authentication, otp, api_keys), guard)
//!     .as_nested_router(Vec::new());
//! ```

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, ports and policy vocabulary
pub mod core {
    pub use bastion_core::*;
}

pub use bastion_core::{
    ActiveUserData, ApiKey, ApiKeyId, Email, NewApiKey, NewUser, Password, PasswordHash,
    Permission, PlainApiKey, Policy, PolicyDenied, PolicyHandler, PolicyKind, RefreshTokenData,
    RefreshTokenId, Role, TfaSecret, TokenPair, User, UserError, UserId,
};

// ============================================================================
// Ports
// ============================================================================

pub use bastion_core::{
    ApiKeyStore, ApiKeyStoreError, CredentialHasher, HasherError, RefreshSessionStore,
    RefreshSessionStoreError, TokenError, TokenSigner, UserStore, UserStoreError,
};

// ============================================================================
// Application Layer
// ============================================================================

/// Authentication, OTP and authorization engines
pub mod application {
    pub use bastion_application::*;
}

pub use bastion_application::{
    ApiKeyService, AuthenticationError, AuthenticationService, AuthorizationError, GeneratedSecret,
    OperationTable, OperationTableBuilder, OtpAuthenticationService, OtpError, PoliciesGuard,
    PolicyHandlerRegistry, PolicyRegistryError, TotpAuthenticator, TotpConfig,
    UnauthorizedReason,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use bastion_adapters::{authentication, config, persistence};
}

pub use bastion_adapters::{
    Argon2Hasher, DashMapRefreshSessionStore, HashMapApiKeyStore, HashMapUserStore, JwtConfig,
    JwtTokenSigner, PostgresApiKeyStore, PostgresUserStore, RedisRefreshSessionStore, Settings,
};

// ============================================================================
// HTTP Surface and Service
// ============================================================================

/// Axum routes, middleware and error mapping
pub mod http {
    pub use bastion_axum::*;
}

pub use bastion_axum::{AppState, AuthApiError};

pub use bastion_auth_service::{
    AuthService,
    helpers::{configure_postgresql, configure_redis, get_redis_client},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
