use std::{collections::HashMap, sync::Arc};

use bastion_core::{Email, NewUser, TfaSecret, User, UserId, UserStore, UserStoreError};
use tokio::sync::RwLock;

#[derive(Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    by_email: HashMap<Email, UserId>,
    last_id: i64,
}

/// In-process user store. Ids are assigned sequentially from 1.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<Users>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.by_id.get(&id).cloned())
    }

    async fn save(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.by_email.contains_key(&user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        users.last_id += 1;
        let user = user.into_user(UserId::new(users.last_id));
        users.by_email.insert(user.email().clone(), user.id());
        users.by_id.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn update_tfa_fields(
        &self,
        id: UserId,
        secret: Option<TfaSecret>,
        enabled: bool,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.by_id.remove(&id).ok_or(UserStoreError::UserNotFound)?;
        users.by_id.insert(id, user.with_tfa(secret, enabled));
        Ok(())
    }
}
