mod api_keys;
mod helpers;
mod policies;
mod refresh_tokens;
mod sign_in;
mod sign_out;
mod sign_up;
mod tfa;
