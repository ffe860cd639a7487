//! Account passwords: Argon2id PHC hashes and generated initial passwords.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::Rng;
use rand::distributions::Alphanumeric;

use bookstore_core::ports::{AuthError, PasswordService};

/// Stores passwords as PHC strings (`$argon2id$...`) with a fresh salt each.
#[derive(Default)]
pub struct Argon2PasswordService {
    hasher: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingError(format!("hashing failed: {e}")))?;
        Ok(phc.to_string())
    }

    /// A stored value that is not a PHC string is an error, not a mismatch.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let stored = PasswordHash::new(hash)
            .map_err(|e| AuthError::HashingError(format!("stored hash unreadable: {e}")))?;

        match self.hasher.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }
}

/// Initial password for accounts created without one, e.g. `q3ZtB8kWm1Pa`.
pub fn generate_password(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}
