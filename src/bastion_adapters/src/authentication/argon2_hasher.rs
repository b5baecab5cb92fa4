use argon2::{
    Algorithm, Argon2, Params, PasswordHash as PhcHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use async_trait::async_trait;
use bastion_core::{CredentialHasher, HasherError, Password, PasswordHash};
use secrecy::{ExposeSecret, Secret};

/// Argon2id with a random salt per hash. Work runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        // 15 MiB, 2 iterations, 1 lane; always valid
        let params = Params::new(15000, 2, 1, None).unwrap_or_default();
        Self::new(params)
    }
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError> {
        let current_span: tracing::Span = tracing::Span::current();
        let hasher = self.argon2();
        let password = password.as_ref().clone();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                hasher
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|h| PasswordHash::new(Secret::from(h.to_string())))
                    .map_err(|e| HasherError(e.to_string()))
            })
        })
        .await
        .map_err(|e| HasherError(e.to_string()))?;

        result
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn compare(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HasherError> {
        let current_span: tracing::Span = tracing::Span::current();
        let verifier = self.argon2();
        let password = password.as_ref().clone();
        let expected = hash.as_ref().clone();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected: PhcHash<'_> = PhcHash::new(expected.expose_secret())
                    .map_err(|e| HasherError(e.to_string()))?;

                match verifier.verify_password(password.expose_secret().as_bytes(), &expected) {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(HasherError(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| HasherError(e.to_string()))?;

        result
    }
}
