use async_trait::async_trait;
use bastion_core::{
    ActiveUserData, Permission, RefreshTokenData, RefreshTokenId, Role, TokenError, TokenSigner,
    UserId,
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub audience: String,
    pub issuer: String,
    pub access_token_ttl_in_seconds: i64,
    pub refresh_token_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// HS256 JWTs with a fixed audience and issuer.
#[derive(Clone)]
pub struct JwtTokenSigner {
    config: JwtConfig,
    validation: Validation,
}

impl JwtTokenSigner {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);
        Self { config, validation }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    // Signs `payload` as a claim set for `sub` expiring `ttl_in_seconds` from now
    fn sign_token<T: Serialize>(
        &self,
        sub: UserId,
        ttl_in_seconds: i64,
        payload: T,
    ) -> Result<String, TokenError> {
        let delta = chrono::Duration::try_seconds(ttl_in_seconds).ok_or_else(|| {
            TokenError::SigningFailed("Failed to create token duration".to_string())
        })?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or_else(|| TokenError::SigningFailed("Duration out of range".to_string()))?
            .timestamp();

        let claims = Claims {
            sub: sub.to_string(),
            aud: self.config.audience.clone(),
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp,
            payload,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    fn verify_token<T: DeserializeOwned>(&self, token: &str) -> Result<(UserId, T), TokenError> {
        let claims = decode::<Claims<T>>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &self.validation,
        )
        .map(|data| data.claims)
        .map_err(|e| TokenError::InvalidToken(e.to_string()))?;

        let sub = claims
            .sub
            .parse()
            .map_err(|_| TokenError::InvalidToken("Malformed subject".to_string()))?;

        Ok((sub, claims.payload))
    }
}

#[async_trait]
impl TokenSigner for JwtTokenSigner {
    #[tracing::instrument(name = "Signing access token", skip_all, fields(user_id = %data.sub))]
    async fn sign_access_token(&self, data: &ActiveUserData) -> Result<String, TokenError> {
        let payload = AccessPayload {
            email: data.email.clone(),
            role: data.role,
            permissions: data.permissions.clone(),
        };
        self.sign_token(data.sub, self.config.access_token_ttl_in_seconds, payload)
    }

    #[tracing::instrument(name = "Signing refresh token", skip_all, fields(user_id = %data.sub))]
    async fn sign_refresh_token(&self, data: &RefreshTokenData) -> Result<String, TokenError> {
        let payload = RefreshPayload {
            refresh_token_id: data.refresh_token_id.clone(),
        };
        self.sign_token(data.sub, self.config.refresh_token_ttl_in_seconds, payload)
    }

    async fn verify_access_token(&self, token: &str) -> Result<ActiveUserData, TokenError> {
        let (sub, payload) = self.verify_token::<AccessPayload>(token)?;
        Ok(ActiveUserData {
            sub,
            email: payload.email,
            role: payload.role,
            permissions: payload.permissions,
        })
    }

    async fn verify_refresh_token(&self, token: &str) -> Result<RefreshTokenData, TokenError> {
        let (sub, payload) = self.verify_token::<RefreshPayload>(token)?;
        Ok(RefreshTokenData {
            sub,
            refresh_token_id: payload.refresh_token_id,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims<T> {
    sub: String,
    aud: String,
    iss: String,
    iat: i64,
    exp: i64,
    #[serde(flatten)]
    payload: T,
}

#[derive(Debug, Serialize, Deserialize)]
struct AccessPayload {
    email: String,
    role: Role,
    permissions: Vec<Permission>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RefreshPayload {
    #[serde(rename = "refreshTokenId")]
    refresh_token_id: RefreshTokenId,
}
