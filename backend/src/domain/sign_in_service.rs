//! Email and password authentication backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::ports::{
    INVALID_CREDENTIALS_MESSAGE, LoginService, PasswordHashError, PasswordHasher,
    UNCONFIRMED_MESSAGE, UserRepository,
};
use super::repository_errors::map_user_error;
use super::{Email, Error, SignInCredentials, User, UserId};

/// [`LoginService`] that checks Argon2-style password hashes.
#[derive(Clone)]
pub struct SignInService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> SignInService<U, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

#[async_trait]
impl<U, H> LoginService for SignInService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &SignInCredentials) -> Result<UserId, Error> {
        let Ok(email) = Email::new(credentials.email()) else {
            return Err(invalid_credentials());
        };
        let Some(account) = self
            .users
            .find_account_by_email(&email)
            .await
            .map_err(map_user_error)?
        else {
            debug!("sign-in attempt for unknown email");
            return Err(invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .map_err(|err| match err {
                PasswordHashError::Malformed { .. } => {
                    warn!(user_id = %account.user.id(), "stored password hash is malformed");
                    Error::internal(err.to_string())
                }
                PasswordHashError::Hash { .. } => Error::internal(err.to_string()),
            })?;
        if !matches {
            return Err(invalid_credentials());
        }
        if !account.user.is_confirmed() {
            return Err(Error::forbidden(UNCONFIRMED_MESSAGE));
        }
        Ok(*account.user.id())
    }

    async fn current_user(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        let user = self.users.find_by_id(user_id).await.map_err(map_user_error)?;
        if user.is_none() {
            debug!(%user_id, "session refers to a missing user");
        }
        Ok(user)
    }
}
