//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, Email, User, UserAccount, UserId};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
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
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let invalid = |err| UserPersistenceError::query(format!("stored user is invalid: {err}"));
    let mut user = User::new(
        UserId::from_uuid(row.id),
        Email::new(&row.email).map_err(invalid)?,
        DisplayName::new(row.display_name).map_err(invalid)?,
    );
    if let Some(at) = row.confirmed_at {
        user = user.confirmed(at);
    }
    Ok(UserAccount {
        user,
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert_account(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user = &account.user;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            display_name: user.display_name().as_ref(),
            password_hash: account.password_hash.as_str(),
            confirmed_at: user.confirmed_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| match constraint_violation(&err) {
                Some(ConstraintViolation::Unique) => {
                    UserPersistenceError::duplicate_email(user.email().as_ref())
                }
                _ => map_diesel_error(err),
            })?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row_to_account(row).map(|account| account.user))
            .transpose()
    }

    async fn find_account_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }
}
