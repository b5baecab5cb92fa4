use std::{collections::HashMap, sync::Arc};

use bastion_core::{ApiKey, ApiKeyId, ApiKeyStore, ApiKeyStoreError, NewApiKey};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct ApiKeys {
    by_uuid: HashMap<Uuid, ApiKey>,
    last_id: i64,
}

/// In-process API key store. Owners are not checked against any user store.
#[derive(Default, Clone)]
pub struct HashMapApiKeyStore {
    keys: Arc<RwLock<ApiKeys>>,
}

impl HashMapApiKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ApiKeyStore for HashMapApiKeyStore {
    async fn save(&self, key: NewApiKey) -> Result<ApiKey, ApiKeyStoreError> {
        let mut keys = self.keys.write().await;
        if keys.by_uuid.contains_key(&key.uuid) {
            return Err(ApiKeyStoreError::UnexpectedError(format!(
                "duplicate API key uuid {}",
                key.uuid
            )));
        }

        keys.last_id += 1;
        let key = key.into_api_key(ApiKeyId::new(keys.last_id));
        keys.by_uuid.insert(key.uuid(), key.clone());
        Ok(key)
    }

    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<ApiKey>, ApiKeyStoreError> {
        Ok(self.keys.read().await.by_uuid.get(uuid).cloned())
    }
}
