use std::sync::Arc;

use bastion_core::{RefreshSessionStore, RefreshSessionStoreError, RefreshTokenId, UserId};
use dashmap::{DashMap, mapref::entry::Entry};

/// In-process refresh sessions. Each operation holds the shard lock for its
/// key, which makes `consume` atomic per principal.
///
/// Only correct for a single service instance; use the Redis store otherwise.
#[derive(Default, Clone)]
pub struct DashMapRefreshSessionStore {
    sessions: Arc<DashMap<UserId, RefreshTokenId>>,
}

impl DashMapRefreshSessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RefreshSessionStore for DashMapRefreshSessionStore {
    async fn insert(
        &self,
        user_id: UserId,
        token_id: RefreshTokenId,
    ) -> Result<(), RefreshSessionStoreError> {
        self.sessions.insert(user_id, token_id);
        Ok(())
    }

    async fn validate(
        &self,
        user_id: UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshSessionStoreError> {
        match self.sessions.get(&user_id) {
            None => Ok(false),
            Some(stored) if stored.value() == token_id => Ok(true),
            Some(_) => Err(RefreshSessionStoreError::InvalidatedRefreshToken),
        }
    }

    async fn consume(
        &self,
        user_id: UserId,
        token_id: &RefreshTokenId,
    ) -> Result<bool, RefreshSessionStoreError> {
        match self.sessions.entry(user_id) {
            Entry::Vacant(_) => Ok(false),
            Entry::Occupied(stored) if stored.get() == token_id => {
                stored.remove();
                Ok(true)
            }
            Entry::Occupied(_) => Err(RefreshSessionStoreError::InvalidatedRefreshToken),
        }
    }

    async fn invalidate(&self, user_id: UserId) -> Result<(), RefreshSessionStoreError> {
        self.sessions.remove(&user_id);
        Ok(())
    }
}
