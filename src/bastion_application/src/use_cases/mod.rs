pub mod create_api_key;
pub mod generate_tokens;
pub mod refresh_tokens;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod validate_api_key;

pub use create_api_key::CreateApiKeyUseCase;
pub use generate_tokens::GenerateTokensUseCase;
pub use refresh_tokens::RefreshTokensUseCase;
pub use sign_in::SignInUseCase;
pub use sign_out::SignOutUseCase;
pub use sign_up::SignUpUseCase;
pub use validate_api_key::ValidateApiKeyUseCase;
