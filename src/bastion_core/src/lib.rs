pub mod domain;
pub mod policy;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    api_key::{ApiKey, ApiKeyError, ApiKeyId, NewApiKey, PlainApiKey},
    email::Email,
    password::{Password, PasswordHash},
    tfa_secret::TfaSecret,
    tokens::{ActiveUserData, RefreshTokenData, RefreshTokenId, TokenPair},
    user::{NewUser, Permission, Role, User, UserError, UserId},
};

pub use policy::{Policy, PolicyDenied, PolicyHandler, PolicyKind};

pub use ports::{
    repositories::{
        ApiKeyStore, ApiKeyStoreError, RefreshSessionStore, RefreshSessionStoreError, UserStore,
        UserStoreError,
    },
    services::{CredentialHasher, HasherError, TokenError, TokenSigner},
};
