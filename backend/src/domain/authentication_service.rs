//! Authentication domain service.
//!
//! Issues bearer tokens, registers and logs in accounts, and resolves
//! inbound tokens into principals. Role checks stay with the callers.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    AccountService, NewUser, PasswordHasher, PasswordHasherError, TokenCodec, TokenCodecError,
    TokenVerifier, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, AuthError, LoginCredentials, Password, Principal, Registration, Role, User,
    password_meets_policy,
};

/// E-mail carried by tokens minted through the dummy login.
pub const DUMMY_LOGIN_EMAIL: &str = "test@test.com";
/// Lifetime of every issued token, in hours.
pub const TOKEN_TTL_HOURS: i64 = 24;

fn map_user_persistence_error(error: UserPersistenceError) -> AuthError {
    match error {
        UserPersistenceError::Connection { message } => AuthError::storage_unavailable(message),
        UserPersistenceError::Query { message } => AuthError::storage(message),
        UserPersistenceError::EmailConflict => AuthError::UserAlreadyExists,
    }
}

fn map_hasher_error(error: PasswordHasherError) -> AuthError {
    match error {
        PasswordHasherError::Hashing { message } => AuthError::password_hashing(message),
    }
}

fn map_codec_error(error: TokenCodecError) -> AuthError {
    match error {
        TokenCodecError::Encoding { message } => AuthError::token_encoding_failed(message),
        TokenCodecError::Invalid { .. } => AuthError::InvalidToken,
        TokenCodecError::Claims { .. } => AuthError::InvalidClaims,
    }
}

/// Account and token service implementing [`AccountService`] and
/// [`TokenVerifier`].
pub struct AuthenticationService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, H, T> AuthenticationService<U, H, T> {
    /// Create a service from its driven ports.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<U, H, T> AuthenticationService<U, H, T>
where
    H: PasswordHasher + 'static,
    T: TokenCodec,
{
    async fn issue(&self, principal: &Principal) -> Result<AccessToken, AuthError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at + Duration::hours(TOKEN_TTL_HOURS);
        self.tokens
            .issue(principal, issued_at, expires_at)
            .await
            .map_err(map_codec_error)
    }

    async fn hash_password(&self, password: Password) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| AuthError::password_hashing(err.to_string()))?
            .map_err(map_hasher_error)
    }

    async fn verify_password(&self, password: Password, hash: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| AuthError::password_hashing(err.to_string()))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<U, H, T> AccountService for AuthenticationService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
{
    async fn dummy_login(&self, role: Role) -> Result<AccessToken, AuthError> {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            email: DUMMY_LOGIN_EMAIL.to_owned(),
            role,
        };
        self.issue(&principal).await
    }

    async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        let Registration {
            email,
            password,
            role,
        } = registration;
        if !password_meets_policy(password.expose()) {
            return Err(AuthError::WeakPassword);
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .users
            .create(&NewUser {
                email,
                password_hash,
                role,
            })
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id, role = user.role.as_str(), "user registered");
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, AuthError> {
        let LoginCredentials { email, password } = credentials;
        let stored = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or(AuthError::UserNotFound)?;

        if !self.verify_password(password, stored.password_hash).await? {
            warn!(user_id = %stored.user.id, "login rejected: wrong password");
            return Err(AuthError::WrongPassword);
        }

        self.issue(&Principal {
            user_id: stored.user.id,
            email: stored.user.email.as_str().to_owned(),
            role: stored.user.role,
        })
        .await
    }
}

#[async_trait]
impl<U, H, T> TokenVerifier for AuthenticationService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenCodec,
{
    async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.tokens.decode(token).await.map_err(map_codec_error)
    }
}

#[cfg(test)]
#[path = "authentication_service_tests.rs"]
mod tests;
