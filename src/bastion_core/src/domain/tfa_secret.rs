use secrecy::{ExposeSecret, Secret};

/// Base32-encoded TOTP shared secret.
///
/// Stored in cleartext because verifying a code needs the original secret.
/// Deliberately not `Serialize`: it must never appear in an outward payload.
#[derive(Debug, Clone)]
pub struct TfaSecret(Secret<String>);

impl TfaSecret {
    pub fn new(base32: Secret<String>) -> Self {
        Self(base32)
    }

    pub fn expose_base32(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for TfaSecret {
    fn from(base32: String) -> Self {
        Self(Secret::from(base32))
    }
}
