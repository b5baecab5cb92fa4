use bastion_core::{
    CredentialHasher, Email, Password, RefreshSessionStore, TokenPair, TokenSigner, UserStore,
};

use super::GenerateTokensUseCase;
use crate::{
    decoy::DecoyHash,
    error::{AuthenticationError, UnauthorizedReason},
    otp::TotpAuthenticator,
};

/// Sign-in use case - checks credentials (and the second factor when enabled)
/// and issues a token pair.
pub struct SignInUseCase<'a, U, H, S, T>
where
    U: UserStore,
    H: CredentialHasher,
    S: RefreshSessionStore,
    T: TokenSigner,
{
    user_store: &'a U,
    hasher: &'a H,
    decoy: &'a DecoyHash,
    totp: &'a TotpAuthenticator,
    generate_tokens: GenerateTokensUseCase<'a, S, T>,
}

impl<'a, U, H, S, T> SignInUseCase<'a, U, H, S, T>
where
    U: UserStore,
    H: CredentialHasher,
    S: RefreshSessionStore,
    T: TokenSigner,
{
    pub fn new(
        user_store: &'a U,
        hasher: &'a H,
        decoy: &'a DecoyHash,
        totp: &'a TotpAuthenticator,
        generate_tokens: GenerateTokensUseCase<'a, S, T>,
    ) -> Self {
        Self {
            user_store,
            hasher,
            decoy,
            totp,
            generate_tokens,
        }
    }

    /// Unknown e-mail and wrong password fail with different reasons but the
    /// same outward message, and both pay for one hash comparison.
    #[tracing::instrument(name = "SignInUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        tfa_code: Option<&str>,
    ) -> Result<TokenPair, AuthenticationError> {
        let Some(user) = self.user_store.find_by_email(&email).await? else {
            self.decoy.compare(self.hasher, &password).await;
            return Err(unauthorized(UnauthorizedReason::UnknownUser));
        };

        if !self.hasher.compare(&password, user.password_hash()).await? {
            tracing::warn!(user_id = %user.id(), "Password mismatch");
            return Err(unauthorized(UnauthorizedReason::PasswordMismatch));
        }

        if user.is_tfa_enabled() {
            let verified = match (tfa_code, user.tfa_secret()) {
                (Some(code), Some(secret)) => self.totp.verify_code(code, secret),
                _ => false,
            };
            if !verified {
                tracing::warn!(user_id = %user.id(), "Missing or invalid two-factor code");
                return Err(unauthorized(UnauthorizedReason::InvalidTfaCode));
            }
        }

        self.generate_tokens.execute(&user).await
    }
}

fn unauthorized(reason: UnauthorizedReason) -> AuthenticationError {
    tracing::debug!(?reason, "Sign-in refused");
    AuthenticationError::Unauthorized(reason)
}

#[cfg(test)]
mod tests {
    use bastion_core::{TfaSecret, UserId};

    use super::*;
    use crate::{
        otp::TotpConfig,
        test_support::{
            CountingHasher, JsonTokenSigner, MockSessionStore, MockUserStore, email, password,
        },
        use_cases::SignUpUseCase,
    };

    struct Fixture {
        store: MockUserStore,
        hasher: CountingHasher,
        decoy: DecoyHash,
        sessions: MockSessionStore,
        signer: JsonTokenSigner,
        totp: TotpAuthenticator,
    }

    impl Fixture {
        async fn with_user(address: &str, plaintext: &str) -> Self {
            let fixture = Self {
                store: MockUserStore::default(),
                hasher: CountingHasher::default(),
                decoy: DecoyHash::new(),
                sessions: MockSessionStore::default(),
                signer: JsonTokenSigner,
                totp: TotpAuthenticator::new(TotpConfig::default()),
            };
            SignUpUseCase::new(&fixture.store, &fixture.hasher)
                .execute(email(address), password(plaintext))
                .await
                .unwrap();
            fixture
        }

        fn use_case(
            &self,
        ) -> SignInUseCase<'_, MockUserStore, CountingHasher, MockSessionStore, JsonTokenSigner> {
            SignInUseCase::new(
                &self.store,
                &self.hasher,
                &self.decoy,
                &self.totp,
                GenerateTokensUseCase::new(&self.sessions, &self.signer),
            )
        }
    }

    #[tokio::test]
    async fn correct_credentials_issue_tokens() {
        let fixture = Fixture::with_user("a@x.com", "P@ss1").await;

        let pair = fixture
            .use_case()
            .execute(email("a@x.com"), password("P@ss1"), None)
            .await
            .unwrap();

        let claims = fixture.signer.verify_access_token(&pair.access_token).await.unwrap();
        assert_eq!(claims.sub, UserId::new(1));
        assert_eq!(claims.email, "a@x.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_alike() {
        let fixture = Fixture::with_user("a@x.com", "P@ss1").await;
        let use_case = fixture.use_case();

        let mismatch = use_case
            .execute(email("a@x.com"), password("wrong"), None)
            .await
            .unwrap_err();
        let unknown = use_case
            .execute(email("nobody@x.com"), password("x"), None)
            .await
            .unwrap_err();

        assert_eq!(
            mismatch.unauthorized_reason(),
            Some(UnauthorizedReason::PasswordMismatch)
        );
        assert_eq!(
            unknown.unauthorized_reason(),
            Some(UnauthorizedReason::UnknownUser)
        );
        assert_eq!(mismatch.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn unknown_user_still_runs_one_comparison() {
        let fixture = Fixture::with_user("a@x.com", "P@ss1").await;
        let compares_before = fixture.hasher.compares();

        fixture
            .use_case()
            .execute(email("nobody@x.com"), password("P@ss1"), None)
            .await
            .unwrap_err();

        assert_eq!(fixture.hasher.compares() - compares_before, 1);
    }

    #[tokio::test]
    async fn wrong_password_runs_one_comparison() {
        let fixture = Fixture::with_user("a@x.com", "P@ss1").await;
        let compares_before = fixture.hasher.compares();

        fixture
            .use_case()
            .execute(email("a@x.com"), password("wrong"), None)
            .await
            .unwrap_err();

        assert_eq!(fixture.hasher.compares() - compares_before, 1);
    }

    #[tokio::test]
    async fn tfa_enabled_user_needs_valid_code() {
        let fixture = Fixture::with_user("a@x.com", "P@ss1").await;
        let secret: TfaSecret = fixture.totp.generate_secret(&email("a@x.com")).unwrap().secret;
        fixture
            .store
            .update_tfa_fields(UserId::new(1), Some(secret.clone()), true)
            .await
            .unwrap();
        let use_case = fixture.use_case();

        let missing = use_case
            .execute(email("a@x.com"), password("P@ss1"), None)
            .await
            .unwrap_err();
        assert_eq!(
            missing.unauthorized_reason(),
            Some(UnauthorizedReason::InvalidTfaCode)
        );

        let code = fixture.totp.generate_current_code(&secret).unwrap();
        use_case
            .execute(email("a@x.com"), password("P@ss1"), Some(&code))
            .await
            .unwrap();
    }
}
