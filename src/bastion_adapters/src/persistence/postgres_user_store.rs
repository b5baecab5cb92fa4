use bastion_core::{
    Email, NewUser, PasswordHash, Permission, Role, TfaSecret, User, UserId, UserStore,
    UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool};

// Postgres `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

const USER_COLUMNS: &str =
    "id, email, password_hash, role, permissions, tfa_secret, is_tfa_enabled";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    role: String,
    permissions: Vec<String>,
    tfa_secret: Option<String>,
    is_tfa_enabled: bool,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let role: Role = row.role.parse().map_err(UserStoreError::UnexpectedError)?;

        Ok(User::new(
            UserId::new(row.id),
            email,
            PasswordHash::new(Secret::from(row.password_hash)),
        )
        .with_role(role)
        .with_permissions(row.permissions.into_iter().map(Permission::new).collect())
        .with_tfa(row.tfa_secret.map(TfaSecret::from), row.is_tfa_enabled))
    }
}

fn unexpected(e: sqlx::Error) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user by e-mail from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn save(&self, user: NewUser) -> Result<User, UserStoreError> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role, permissions) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        let permissions: Vec<String> = user
            .permissions
            .iter()
            .map(|p| p.as_str().to_owned())
            .collect();

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.email.as_ref().expose_secret())
            .bind(user.password_hash.as_ref().expose_secret())
            .bind(user.role.as_str())
            .bind(permissions)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                        return UserStoreError::UserAlreadyExists;
                    }
                }
                unexpected(e)
            })?;

        User::try_from(row)
    }

    #[tracing::instrument(name = "Updating TFA fields in PostgreSQL", skip(self, secret))]
    async fn update_tfa_fields(
        &self,
        id: UserId,
        secret: Option<TfaSecret>,
        enabled: bool,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET tfa_secret = $1, is_tfa_enabled = $2
                WHERE id = $3
            "#,
        )
        .bind(secret.as_ref().map(TfaSecret::expose_base32))
        .bind(enabled)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}
