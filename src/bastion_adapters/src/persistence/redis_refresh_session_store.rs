use std::sync::LazyLock;

use bastion_core::{RefreshSessionStore, RefreshSessionStoreError, RefreshTokenId, UserId};
use redis::{AsyncCommands, Script, aio::MultiplexedConnection};

use crate::config::REFRESH_SESSION_KEY_PREFIX;

// 1 = matched and deleted, 0 = no session, -1 = a different identifier is stored
static CONSUME_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        local current = redis.call('GET', KEYS[1])
        if not current then
            return 0
        end
        if current == ARGV[1] then
            redis.call('DEL', KEYS[1])
            return 1
        end
        return -1
        ",
    )
});

/// Refresh sessions shared by every service instance. One key per principal,
/// expiring together with the refresh token it guards.
#[derive(Clone)]
pub struct RedisRefreshSessionStore {
    conn: MultiplexedConnection,
    ttl_in_seconds: u64,
}

impl RedisRefreshSessionStore {
    pub fn new(conn: MultiplexedConnection, ttl_in_seconds: u64) -> Self {
        Self {
            conn,
            ttl_in_seconds,
        }
    }
}

fn unexpected(e: redis::RedisError) -> RefreshSessionStoreError {
    RefreshSessionStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl RefreshSessionStore for RedisRefreshSessionStore {
    #[tracing::instrument(name = "Storing refresh session in Redis", skip(self, token_id))]
    async fn insert(
        &self,
        user_id: UserId,
        token_id: RefreshTokenId,
    ) -> Result<(), RefreshSessionStoreError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(get_key(user_id), token_id.as_str(), self.ttl_in_seconds)
            .await
            .map_err(unexpected)
    }

    #[tracing::instrument(name = "Validating refresh session in Redis", skip(self, token_id))]
    async fn validate(
        &self,
        user_id: UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshSessionStoreError> {
        let mut conn = self.conn.clone();
        let stored: Option<String> = conn.get(get_key(user_id)).await.map_err(unexpected)?;

        match stored {
            None => Ok(false),
            Some(stored) if stored == token_id.as_str() => Ok(true),
            Some(_) => Err(RefreshSessionStoreError::InvalidatedRefreshToken),
        }
    }

    #[tracing::instrument(name = "Consuming refresh session in Redis", skip(self, token_id))]
    async fn consume(
        &self,
        user_id: UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshSessionStoreError> {
        let mut conn = self.conn.clone();
        let outcome: i64 = CONSUME_SCRIPT
            .key(get_key(user_id))
            .arg(token_id.as_str())
            .invoke_async(&mut conn)
            .await
            .map_err(unexpected)?;

        match outcome {
            1 => Ok(true),
            0 => Ok(false),
            _ => Err(RefreshSessionStoreError::InvalidatedRefreshToken),
        }
    }

    #[tracing::instrument(name = "Invalidating refresh session in Redis", skip(self))]
    async fn invalidate(&self, user_id: UserId) -> Result<(), RefreshSessionStoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(get_key(user_id)).await.map_err(unexpected)
    }
}

fn get_key(user_id: UserId) -> String {
    format!("{REFRESH_SESSION_KEY_PREFIX}{user_id}")
}
