//! Driving port for sign-in use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! knowing the backing infrastructure. Handler tests substitute
//! [`FixtureLoginService`] instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{DisplayName, Email, Error, SignInCredentials, User, UserId};

/// Message returned for unknown emails and wrong passwords alike.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";
/// Message returned when the account exists but is not confirmed.
pub const UNCONFIRMED_MESSAGE: &str = "you have to confirm your email address before continuing";
/// Message attached to the redirect sent to callers who are not signed in.
pub const SIGN_IN_REQUIRED_MESSAGE: &str = "you need to sign in or sign up before continuing";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Fails with `unauthorized` for bad credentials and `forbidden` when the
    /// account has not been confirmed.
    async fn authenticate(&self, credentials: &SignInCredentials) -> Result<UserId, Error>;

    /// Resolve the user a session refers to.
    ///
    /// Returns `None` when the account no longer exists, in which case the
    /// session must be treated as signed out.
    async fn current_user(&self, user_id: &UserId) -> Result<Option<User>, Error>;
}

/// Deterministic authenticator for handler tests.
///
/// `ada@example.com` / `password` signs in as [`FixtureLoginService::USER_ID`];
/// `pending@example.com` / `password` is treated as unconfirmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    /// User id returned for the confirmed fixture account.
    pub const USER_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &SignInCredentials) -> Result<UserId, Error> {
        match (credentials.email(), credentials.password()) {
            ("ada@example.com", "password") => UserId::new(Self::USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}"))),
            ("pending@example.com", "password") => Err(Error::forbidden(UNCONFIRMED_MESSAGE)),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)),
        }
    }

    async fn current_user(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        if user_id.to_string() != Self::USER_ID {
            return Ok(None);
        }
        let email = Email::new("ada@example.com")
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        let display_name = DisplayName::new("Ada Lovelace")
            .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
        Ok(Some(User::new(*user_id, email, display_name)))
    }
}
