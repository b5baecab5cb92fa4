pub mod authentication;
pub mod config;
pub mod persistence;

// Re-export commonly used types for convenience
pub use authentication::{Argon2Hasher, JwtConfig, JwtTokenSigner};
pub use config::Settings;
pub use persistence::{
    DashMapRefreshSessionStore, HashMapApiKeyStore, HashMapUserStore, PostgresApiKeyStore,
    PostgresUserStore, RedisRefreshSessionStore,
};
