//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewUser, StoredUser, UserPersistenceError, UserRepository};
use crate::domain::{Email, Role, User};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, violated_unique_constraint,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERS_EMAIL_KEY: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    if violated_unique_constraint(&error) == Some(USERS_EMAIL_KEY) {
        return UserPersistenceError::EmailConflict;
    }
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_stored_user(row: UserRow) -> Result<StoredUser, UserPersistenceError> {
    let email = Email::new(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email is invalid: {err}")))?;
    let role = row
        .role
        .parse::<Role>()
        .map_err(|err| UserPersistenceError::query(format!("stored role is invalid: {err}")))?;
    Ok(StoredUser {
        user: User {
            id: row.id,
            email,
            role,
        },
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
            role: user.role.as_str(),
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_stored_user(stored).map(|stored| stored.user)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_stored_user).transpose()
    }
}
