use bastion_core::{RefreshSessionStore, UserId};

use crate::error::AuthenticationError;

/// Sign-out use case - drops the principal's refresh session.
///
/// Access tokens already issued stay valid until they expire.
pub struct SignOutUseCase<'a, S>
where
    S: RefreshSessionStore,
{
    sessions: &'a S,
}

impl<'a, S> SignOutUseCase<'a, S>
where
    S: RefreshSessionStore,
{
    pub fn new(sessions: &'a S) -> Self {
        Self { sessions }
    }

    #[tracing::instrument(name = "SignOutUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<(), AuthenticationError> {
        self.sessions.invalidate(user_id).await?;
        Ok(())
    }
}
