use bastion_core::{CredentialHasher, HasherError, Password, PasswordHash};
use secrecy::Secret;
use tokio::sync::OnceCell;

const DECOY_PLAINTEXT: &str = "decoy-credential";

/// A hash produced once by the configured hasher and compared against when a
/// credential has no stored counterpart, so the miss costs as much as a
/// mismatch.
#[derive(Debug, Default)]
pub struct DecoyHash {
    hash: OnceCell<PasswordHash>,
}

impl DecoyHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a full comparison and discards the outcome.
    #[tracing::instrument(name = "DecoyHash::compare", skip_all)]
    pub async fn compare<H: CredentialHasher>(&self, hasher: &H, password: &Password) {
        if let Err(e) = self.run(hasher, password).await {
            tracing::debug!(error = %e, "Decoy comparison failed");
        }
    }

    async fn run<H: CredentialHasher>(
        &self,
        hasher: &H,
        password: &Password,
    ) -> Result<bool, HasherError> {
        let hash = self
            .hash
            .get_or_try_init(|| async move {
                let decoy = Password::try_from(Secret::from(DECOY_PLAINTEXT.to_owned()))
                    .map_err(|e| HasherError(e.to_string()))?;
                hasher.hash(&decoy).await
            })
            .await?;
        hasher.compare(password, hash).await
    }
}
