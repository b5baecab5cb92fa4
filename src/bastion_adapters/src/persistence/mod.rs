pub mod dashmap_refresh_session_store;
pub mod hashmap_api_key_store;
pub mod hashmap_user_store;
pub mod postgres_api_key_store;
pub mod postgres_user_store;
pub mod redis_refresh_session_store;

pub use dashmap_refresh_session_store::DashMapRefreshSessionStore;
pub use hashmap_api_key_store::HashMapApiKeyStore;
pub use hashmap_user_store::HashMapUserStore;
pub use postgres_api_key_store::PostgresApiKeyStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_refresh_session_store::RedisRefreshSessionStore;
