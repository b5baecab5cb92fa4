use bastion_core::{CredentialHasher, Email, NewUser, Password, User, UserStore};

use crate::error::AuthenticationError;

/// Sign-up use case - registers a new principal. No token is issued.
pub struct SignUpUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> SignUpUseCase<'a, U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Hashes `password` and persists the principal.
    ///
    /// A duplicate e-mail surfaces as [`AuthenticationError::Conflict`]; no
    /// second record is created.
    #[tracing::instrument(name = "SignUpUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, password: Password) -> Result<User, AuthenticationError> {
        let password_hash = self.hasher.hash(&password).await?;
        let user = self
            .user_store
            .save(NewUser::new(email, password_hash))
            .await
            .inspect_err(|e| tracing::debug!(error = %e, "Sign-up rejected by user store"))?;

        tracing::info!(user_id = %user.id(), "User signed up");
        Ok(user)
    }
}
