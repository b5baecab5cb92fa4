pub mod api_keys;
pub mod refresh_tokens;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod tfa;

pub use api_keys::{CreateApiKeyResponse, create_api_key};
pub use refresh_tokens::{RefreshTokensRequest, refresh_tokens};
pub use sign_in::{SignInRequest, sign_in};
pub use sign_out::sign_out;
pub use sign_up::{SignUpRequest, SignUpResponse, sign_up};
pub use tfa::{ConfirmTfaRequest, confirm_tfa, generate_tfa_qr_code};
