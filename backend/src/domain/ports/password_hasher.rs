//! Driven port for one-way password hashing.

use crate::domain::Password;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hasher adapters.
    pub enum PasswordHasherError {
        /// Hashing failed or the stored hash could not be parsed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes passwords and verifies them against stored hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing hash string.
    fn hash(&self, password: &Password) -> Result<String, PasswordHasherError>;

    /// Return `Ok(false)` when `password` does not match `hash`.
    fn verify(&self, password: &Password, hash: &str) -> Result<bool, PasswordHasherError>;
}
