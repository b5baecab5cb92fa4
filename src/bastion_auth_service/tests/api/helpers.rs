use std::sync::Arc;

use argon2::Params;
use bastion_adapters::{
    Argon2Hasher, DashMapRefreshSessionStore, HashMapApiKeyStore, HashMapUserStore, JwtConfig,
    JwtTokenSigner, config::test,
};
use bastion_application::{
    ApiKeyService, AuthenticationService, OperationTable, OtpAuthenticationService, PoliciesGuard,
    PolicyHandlerRegistry, TotpAuthenticator,
};
use bastion_auth_service::AuthService;
use bastion_axum::AppState;
use bastion_core::{Email, TfaSecret, TokenPair, UserStore};
use fake::{Fake, faker::internet::en::SafeEmail};
use secrecy::Secret;
use serde::Serialize;

pub const PASSWORD: &str = "P@ssw0rd!";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub user_store: HashMapUserStore,
    pub totp: TotpAuthenticator,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_policies(OperationTable::default()).await
    }

    pub async fn with_policies(table: OperationTable) -> Self {
        let user_store = HashMapUserStore::default();
        let totp = TotpAuthenticator::default();
        let signer = JwtTokenSigner::new(JwtConfig {
            secret: Secret::from("api-test-secret-long-enough".to_owned()),
            audience: "bastion-test".to_owned(),
            issuer: "bastion-test".to_owned(),
            access_token_ttl_in_seconds: 300,
            refresh_token_ttl_in_seconds: 3600,
        });
        let hasher = Argon2Hasher::new(Params::new(1024, 1, 1, None).unwrap());

        let authentication = AuthenticationService::new(
            user_store.clone(),
            hasher.clone(),
            DashMapRefreshSessionStore::default(),
            signer,
            totp.clone(),
        );
        let api_keys =
            ApiKeyService::new(user_store.clone(), hasher, HashMapApiKeyStore::default());
        let otp = OtpAuthenticationService::new(user_store.clone(), totp.clone());
        let guard = PoliciesGuard::new(
            Arc::new(PolicyHandlerRegistry::with_default_handlers()),
            Arc::new(table),
        );

        let router = AuthService::new(AppState::new(authentication, otp, api_keys), guard)
            .as_nested_router(Vec::new());

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
            user_store,
            totp,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/authentication{}", self.address, path)
    }

    pub async fn post_sign_up<Body: Serialize + ?Sized>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(self.url("/sign-up"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_sign_in<Body: Serialize + ?Sized>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(self.url("/sign-in"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh_tokens(&self, refresh_token: &str) -> reqwest::Response {
        self.http_client
            .post(self.url("/refresh-tokens"))
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_sign_out(&self, access_token: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.post(self.url("/sign-out"));
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_tfa_generate(&self, access_token: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.post(self.url("/2fa/generate"));
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_tfa_confirm(&self, access_token: &str, code: &str) -> reqwest::Response {
        self.http_client
            .post(self.url("/2fa/confirm"))
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_api_key(&self, access_token: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.post(self.url("/api-keys"));
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    /// Posts to `path` with a raw `Authorization` header value.
    pub async fn post_with_authorization(
        &self,
        path: &str,
        authorization: &str,
    ) -> reqwest::Response {
        self.http_client
            .post(self.url(path))
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Signs a fresh user up and in, returning the address and its tokens.
    pub async fn signed_in_user(&self) -> (String, TokenPair) {
        self.signed_in_user_with_email(get_random_email()).await
    }

    pub async fn signed_in_user_with_email(&self, email: String) -> (String, TokenPair) {
        let credentials = serde_json::json!({ "email": email, "password": PASSWORD });

        let response = self.post_sign_up(&credentials).await;
        assert_eq!(response.status().as_u16(), 201);

        let response = self.post_sign_in(&credentials).await;
        assert_eq!(response.status().as_u16(), 200);

        (email, response.json().await.unwrap())
    }

    /// The pending or active TFA secret stored for `email`.
    pub async fn stored_tfa_secret(&self, email: &str) -> Option<TfaSecret> {
        let email = Email::try_from(Secret::from(email.to_owned())).unwrap();
        self.user_store
            .find_by_email(&email)
            .await
            .unwrap()
            .and_then(|user| user.tfa_secret().cloned())
    }
}

pub fn get_random_email() -> String {
    SafeEmail().fake()
}

pub async fn error_message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.unwrap();
    body["error"].as_str().unwrap_or_default().to_owned()
}
