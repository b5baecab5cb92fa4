pub mod argon2_hasher;
pub mod jwt_token_signer;

pub use argon2_hasher::Argon2Hasher;
pub use jwt_token_signer::{JwtConfig, JwtTokenSigner};
