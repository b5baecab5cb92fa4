pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    ApplicationSettings, JwtSettings, PostgresSettings, RedisSettings, Settings, TfaSettings,
};
