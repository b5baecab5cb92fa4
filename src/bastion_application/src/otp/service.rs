use bastion_core::{Email, TfaSecret, User, UserStore};

use super::{GeneratedSecret, OtpError, TotpAuthenticator};

/// Second-factor enrollment on top of a [`UserStore`].
///
/// Enrollment is two-step: [`begin_enrollment`](Self::begin_enrollment) stores
/// a pending secret with TFA still disabled, and
/// [`confirm_enrollment`](Self::confirm_enrollment) enables it once the user
/// proves possession of the authenticator by submitting a valid code.
#[derive(Clone)]
pub struct OtpAuthenticationService<U>
where
    U: UserStore,
{
    user_store: U,
    totp: TotpAuthenticator,
}

impl<U> OtpAuthenticationService<U>
where
    U: UserStore,
{
    pub fn new(user_store: U, totp: TotpAuthenticator) -> Self {
        Self { user_store, totp }
    }

    pub fn authenticator(&self) -> &TotpAuthenticator {
        &self.totp
    }

    pub fn generate_secret(&self, email: &Email) -> Result<GeneratedSecret, OtpError> {
        self.totp.generate_secret(email)
    }

    pub fn verify_code(&self, code: &str, secret: &TfaSecret) -> bool {
        self.totp.verify_code(code, secret)
    }

    pub fn provisioning_qr_png(&self, provisioning_uri: &str) -> Result<Vec<u8>, OtpError> {
        self.totp.provisioning_qr_png(provisioning_uri)
    }

    /// Persists `secret` and turns TFA on for the principal owning `email`.
    ///
    /// Callers must have verified possession of the authenticator first.
    #[tracing::instrument(name = "OtpAuthenticationService::enable_tfa_for_user", skip_all)]
    pub async fn enable_tfa_for_user(&self, email: &Email, secret: TfaSecret) -> Result<(), OtpError> {
        let user = self.find_user(email).await?;
        self.user_store
            .update_tfa_fields(user.id(), Some(secret), true)
            .await?;
        tracing::info!(user_id = %user.id(), "Two-factor authentication enabled");
        Ok(())
    }

    /// Generates and stores a pending secret. Restarting an unconfirmed
    /// enrollment replaces the previous pending secret.
    #[tracing::instrument(name = "OtpAuthenticationService::begin_enrollment", skip_all)]
    pub async fn begin_enrollment(&self, email: &Email) -> Result<GeneratedSecret, OtpError> {
        let user = self.find_user(email).await?;
        if user.is_tfa_enabled() {
            return Err(OtpError::AlreadyEnabled);
        }

        let generated = self.totp.generate_secret(email)?;
        self.user_store
            .update_tfa_fields(user.id(), Some(generated.secret.clone()), false)
            .await?;

        Ok(generated)
    }

    #[tracing::instrument(name = "OtpAuthenticationService::confirm_enrollment", skip_all)]
    pub async fn confirm_enrollment(&self, email: &Email, code: &str) -> Result<(), OtpError> {
        let user = self.find_user(email).await?;
        if user.is_tfa_enabled() {
            return Err(OtpError::AlreadyEnabled);
        }

        let secret = user.tfa_secret().cloned().ok_or(OtpError::NotEnrolled)?;
        if !self.totp.verify_code(code, &secret) {
            tracing::warn!(user_id = %user.id(), "Rejected two-factor confirmation code");
            return Err(OtpError::InvalidCode);
        }

        self.enable_tfa_for_user(email, secret).await
    }

    async fn find_user(&self, email: &Email) -> Result<User, OtpError> {
        self.user_store
            .find_by_email(email)
            .await?
            .ok_or(OtpError::NotFound)
    }
}
