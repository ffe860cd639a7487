//! Authentication implementations.

mod jwt;
mod password;
mod signed_token;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::{Argon2PasswordService, generate_password};
pub use signed_token::{DEFAULT_SECRET, secret_from_env, sign_token, verify_token};
