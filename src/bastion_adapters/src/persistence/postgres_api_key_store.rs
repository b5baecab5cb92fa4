use bastion_core::{
    ApiKey, ApiKeyId, ApiKeyStore, ApiKeyStoreError, NewApiKey, PasswordHash, UserId,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

// Postgres `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Clone)]
pub struct PostgresApiKeyStore {
    pool: PgPool,
}

impl PostgresApiKeyStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresApiKeyStore { pool }
    }
}

#[derive(FromRow)]
struct ApiKeyRow {
    id: i64,
    key_hash: String,
    uuid: Uuid,
    user_id: i64,
}

impl From<ApiKeyRow> for ApiKey {
    fn from(row: ApiKeyRow) -> Self {
        ApiKey::new(
            ApiKeyId::new(row.id),
            PasswordHash::new(Secret::from(row.key_hash)),
            row.uuid,
            UserId::new(row.user_id),
        )
    }
}

fn unexpected(e: sqlx::Error) -> ApiKeyStoreError {
    ApiKeyStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl ApiKeyStore for PostgresApiKeyStore {
    #[tracing::instrument(name = "Adding API key to PostgreSQL", skip_all)]
    async fn save(&self, key: NewApiKey) -> Result<ApiKey, ApiKeyStoreError> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            r#"
                INSERT INTO api_keys (key_hash, uuid, user_id)
                VALUES ($1, $2, $3)
                RETURNING id, key_hash, uuid, user_id
            "#,
        )
        .bind(key.key_hash.as_ref().expose_secret())
        .bind(key.uuid)
        .bind(key.user_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                    return ApiKeyStoreError::OwnerNotFound;
                }
            }
            unexpected(e)
        })?;

        Ok(ApiKey::from(row))
    }

    #[tracing::instrument(name = "Retrieving API key by uuid from PostgreSQL", skip(self))]
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<ApiKey>, ApiKeyStoreError> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            "SELECT id, key_hash, uuid, user_id FROM api_keys WHERE uuid = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(row.map(ApiKey::from))
    }
}
