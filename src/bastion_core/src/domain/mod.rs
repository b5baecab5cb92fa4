pub mod api_key;
pub mod email;
pub mod password;
pub mod tfa_secret;
pub mod tokens;
pub mod user;
