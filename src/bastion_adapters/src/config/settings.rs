use bastion_application::TotpConfig;
use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{CONFIG_DIRECTORY, DEFAULT_ENVIRONMENT, env, prod};
use crate::authentication::JwtConfig;

/// Service settings.
///
/// Sources, later ones winning: `config/base.json`, `config/{APP_ENVIRONMENT}.json`,
/// then `BASTION__SECTION__KEY` environment variables (a `.env` file is loaded first).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
    #[serde(default)]
    pub tfa: TfaSettings,
    /// Absent means users are kept in memory.
    pub postgres: Option<PostgresSettings>,
    /// Absent means refresh sessions are kept in memory.
    pub redis: Option<RedisSettings>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplicationSettings {
    pub address: String,
    /// CORS origins; empty disables the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            address: prod::APP_ADDRESS.to_owned(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_in_seconds: i64,
    #[serde(default = "default_refresh_token_ttl")]
    pub refresh_token_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TfaSettings {
    pub app_name: String,
    pub digits: usize,
    pub skew: u8,
    pub step_in_seconds: u64,
}

impl Default for TfaSettings {
    fn default() -> Self {
        let defaults = TotpConfig::default();
        Self {
            app_name: defaults.app_name,
            digits: defaults.digits,
            skew: defaults.skew,
            step_in_seconds: defaults.step_in_seconds,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

fn default_audience() -> String {
    "bastion".to_owned()
}

fn default_issuer() -> String {
    "bastion".to_owned()
}

fn default_access_token_ttl() -> i64 {
    3600
}

fn default_refresh_token_ttl() -> i64 {
    86400
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());

        let settings = Config::builder()
            .add_source(File::with_name(&format!("{CONFIG_DIRECTORY}/base")).required(false))
            .add_source(
                File::with_name(&format!("{CONFIG_DIRECTORY}/{environment}")).required(false),
            )
            .add_source(
                Environment::with_prefix(env::SETTINGS_ENV_PREFIX)
                    .prefix_separator(env::SETTINGS_ENV_SEPARATOR)
                    .separator(env::SETTINGS_ENV_SEPARATOR),
            )
            .build()?;

        settings.try_deserialize()
    }
}

impl From<JwtSettings> for JwtConfig {
    fn from(settings: JwtSettings) -> Self {
        JwtConfig {
            secret: settings.secret,
            audience: settings.audience,
            issuer: settings.issuer,
            access_token_ttl_in_seconds: settings.access_token_ttl_in_seconds,
            refresh_token_ttl_in_seconds: settings.refresh_token_ttl_in_seconds,
        }
    }
}

impl TryFrom<TfaSettings> for TotpConfig {
    type Error = ConfigError;

    fn try_from(settings: TfaSettings) -> Result<Self, Self::Error> {
        let config = TotpConfig {
            app_name: settings.app_name,
            digits: settings.digits,
            skew: settings.skew,
            step_in_seconds: settings.step_in_seconds,
        };
        config
            .validate()
            .map_err(|e| ConfigError::Message(format!("tfa: {e}")))?;
        Ok(config)
    }
}
