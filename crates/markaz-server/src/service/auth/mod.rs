//! Authentication services: password hashing and JWT signing keys.

mod password_hasher;
mod token_keys;

pub use password_hasher::AuthHasher;
pub use token_keys::{AuthClaims, TokenKeys, TokenKeysConfig, TokenUse};
