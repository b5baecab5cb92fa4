use std::ops::RangeInclusive;

use bastion_core::{Email, TfaSecret};
use secrecy::{ExposeSecret, Secret as SecretString};
use totp_rs::{Algorithm, Secret, TOTP};

use super::OtpError;

/// Account label used when a TOTP is only built to check or produce codes.
const VERIFICATION_ACCOUNT: &str = "user";

const SUPPORTED_DIGITS: RangeInclusive<usize> = 6..=8;
const MAX_SKEW: u8 = 5;

#[derive(Debug, Clone)]
pub struct TotpConfig {
    /// Issuer shown by authenticator apps.
    pub app_name: String,
    pub digits: usize,
    /// Accepted drift, in time steps, on either side of the current one.
    pub skew: u8,
    pub step_in_seconds: u64,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            app_name: "Bastion".to_owned(),
            digits: 6,
            skew: 1,
            step_in_seconds: 30,
        }
    }
}

impl TotpConfig {
    /// Rejects values `TOTP::new` would refuse on every call.
    pub fn validate(&self) -> Result<(), OtpError> {
        if !SUPPORTED_DIGITS.contains(&self.digits) {
            return Err(OtpError::InvalidConfig(format!(
                "digits must be between {} and {}, got {}",
                SUPPORTED_DIGITS.start(),
                SUPPORTED_DIGITS.end(),
                self.digits
            )));
        }
        if self.skew > MAX_SKEW {
            return Err(OtpError::InvalidConfig(format!(
                "skew must be at most {MAX_SKEW}, got {}",
                self.skew
            )));
        }
        if self.step_in_seconds == 0 {
            return Err(OtpError::InvalidConfig(
                "step_in_seconds must be positive".to_owned(),
            ));
        }
        if self.app_name.is_empty() || self.app_name.contains(':') {
            return Err(OtpError::InvalidConfig(
                "app_name must be non-empty and free of ':'".to_owned(),
            ));
        }
        Ok(())
    }
}

/// A freshly generated secret and the `otpauth://` URI that enrolls it.
#[derive(Debug, Clone)]
pub struct GeneratedSecret {
    pub secret: TfaSecret,
    pub provisioning_uri: SecretString<String>,
}

/// Stateless TOTP operations (RFC 6238, SHA-1).
#[derive(Debug, Clone, Default)]
pub struct TotpAuthenticator {
    config: TotpConfig,
}

impl TotpAuthenticator {
    pub fn new(config: TotpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TotpConfig {
        &self.config
    }

    /// Generates a 160-bit secret and its provisioning URI for `email`.
    #[tracing::instrument(name = "TotpAuthenticator::generate_secret", skip_all)]
    pub fn generate_secret(&self, email: &Email) -> Result<GeneratedSecret, OtpError> {
        let bytes = Secret::generate_secret()
            .to_bytes()
            .map_err(|e| OtpError::Totp(e.to_string()))?;

        let totp = self.build(bytes, email.as_ref().expose_secret().clone())?;

        Ok(GeneratedSecret {
            secret: TfaSecret::from(totp.get_secret_base32()),
            provisioning_uri: SecretString::from(totp.get_url()),
        })
    }

    /// Checks `code` against the current time step, within the configured skew.
    pub fn verify_code(&self, code: &str, secret: &TfaSecret) -> bool {
        match self.for_secret(secret) {
            Ok(totp) => totp.check_current(code).unwrap_or(false),
            Err(e) => {
                tracing::warn!(error = %e, "Stored TFA secret is unusable");
                false
            }
        }
    }

    /// Checks `code` as if the clock read `timestamp` (Unix seconds).
    pub fn verify_code_at(&self, code: &str, secret: &TfaSecret, timestamp: u64) -> bool {
        self.for_secret(secret)
            .map(|totp| totp.check(code, timestamp))
            .unwrap_or(false)
    }

    /// The code an authenticator app would display at `timestamp`.
    pub fn generate_code_at(&self, secret: &TfaSecret, timestamp: u64) -> Result<String, OtpError> {
        Ok(self.for_secret(secret)?.generate(timestamp))
    }

    /// The code an authenticator app would display right now.
    pub fn generate_current_code(&self, secret: &TfaSecret) -> Result<String, OtpError> {
        self.for_secret(secret)?
            .generate_current()
            .map_err(|e| OtpError::Totp(e.to_string()))
    }

    /// Renders a provisioning URI as a PNG QR code.
    pub fn provisioning_qr_png(&self, provisioning_uri: &str) -> Result<Vec<u8>, OtpError> {
        TOTP::from_url(provisioning_uri)
            .map_err(|e| OtpError::Totp(e.to_string()))?
            .get_qr_png()
            .map_err(OtpError::Totp)
    }

    fn for_secret(&self, secret: &TfaSecret) -> Result<TOTP, OtpError> {
        let bytes = Secret::Encoded(secret.expose_base32().to_owned())
            .to_bytes()
            .map_err(|e| OtpError::Totp(e.to_string()))?;
        self.build(bytes, VERIFICATION_ACCOUNT.to_owned())
    }

    fn build(&self, secret: Vec<u8>, account_name: String) -> Result<TOTP, OtpError> {
        TOTP::new(
            Algorithm::SHA1,
            self.config.digits,
            self.config.skew,
            self.config.step_in_seconds,
            secret,
            Some(self.config.app_name.clone()),
            account_name,
        )
        .map_err(|e| OtpError::Totp(e.to_string()))
    }
}
