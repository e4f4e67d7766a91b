//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Email, Role, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The e-mail address is already registered.
        EmailConflict => "email already registered",
    }
}

/// Account about to be inserted; the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
}

/// Stored account together with its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user, failing with [`UserPersistenceError::EmailConflict`]
    /// when the address is taken.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user and its hash by e-mail address.
    async fn find_by_email(&self, email: &Email)
    -> Result<Option<StoredUser>, UserPersistenceError>;
}

/// Fixture repository that accepts every insert and never finds anyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        Ok(User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            role: user.role,
        })
    }

    async fn find_by_email(
        &self,
        _email: &Email,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        Ok(None)
    }
}
