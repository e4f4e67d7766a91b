//! Argon2id implementation of the password hasher port.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};

use crate::domain::Password;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Hashes with Argon2id default parameters and a random salt per password.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<String, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }

    fn verify(&self, password: &Password, hash: &str) -> Result<bool, PasswordHasherError> {
        let parsed =
            PasswordHash::new(hash).map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        match Argon2::default().verify_password(password.expose().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::hashing(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hashes_verify_against_the_original_password() {
        let hasher = Argon2PasswordHasher::new();
        let password = Password::new("Secr3t!pass");
        let hash = hasher.hash(&password).expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(&password, &hash).expect("verify"));
    }

    #[rstest]
    fn wrong_password_is_not_an_error() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash(&Password::new("Secr3t!pass")).expect("hash");

        let matched = hasher
            .verify(&Password::new("Secr3t!pasS"), &hash)
            .expect("verify");
        assert!(!matched);
    }

    #[rstest]
    fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher::new();
        let password = Password::new("Secr3t!pass");
        let first = hasher.hash(&password).expect("hash");
        let second = hasher.hash(&password).expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn unparseable_hashes_are_errors() {
        let hasher = Argon2PasswordHasher::new();
        let result = hasher.verify(&Password::new("Secr3t!pass"), "plaintext");
        assert!(matches!(result, Err(PasswordHasherError::Hashing { .. })));
    }
}
