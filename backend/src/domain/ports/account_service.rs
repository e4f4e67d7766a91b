//! Driving ports for account and token use-cases.
//!
//! HTTP handlers and the bearer extractor depend on these traits rather than
//! on the hashing, signing and persistence adapters behind them, so handler
//! tests can substitute doubles.

use async_trait::async_trait;

use crate::domain::{AccessToken, AuthError, LoginCredentials, Principal, Registration, Role, User};

/// Domain use-case port for issuing tokens and managing accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Issue a token for a throwaway principal holding `role`.
    async fn dummy_login(&self, role: Role) -> Result<AccessToken, AuthError>;

    /// Create an account after checking the password policy.
    async fn register(&self, registration: Registration) -> Result<User, AuthError>;

    /// Exchange valid credentials for a token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, AuthError>;
}

/// Resolves bearer tokens into principals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Validate `token` and return the principal it names.
    async fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}
