use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{PasswordHasher as _, PasswordVerifier as _};

use crate::domain::repository::PasswordHasher;
use crate::error::ChemtrackError;

/// Argon2id password hashing with per-hash random salts.
#[derive(Clone, Default)]
pub struct ArgonHasher;

impl PasswordHasher for ArgonHasher {
    fn hash(&self, password: &str) -> Result<String, ChemtrackError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ChemtrackError::Internal(anyhow::anyhow!("hash password: {e}")))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, ChemtrackError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| ChemtrackError::Internal(anyhow::anyhow!("parse password hash: {e}")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
