//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as signing a user in or out.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::{LoginService, SIGN_IN_REQUIRED_MESSAGE};
use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session for `user_id`.
    ///
    /// The session key is renewed so a cookie issued before sign-in cannot
    /// be reused afterwards.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Forget the signed-in user.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A malformed id is treated as signed out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Whether a user is signed in; read failures count as signed out.
    pub fn is_signed_in(&self) -> bool {
        matches!(self.user_id(), Ok(Some(_)))
    }

    /// Require a session user id or fail with `unauthorized`, which the HTTP
    /// adapter turns into a redirect to the sign-in page.
    ///
    /// This only inspects the cookie; use [`Self::require_user`] before
    /// acting on the caller's behalf.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized(SIGN_IN_REQUIRED_MESSAGE))
    }

    /// Require a session whose user still exists.
    ///
    /// A cookie naming an unknown account is purged and answered like an
    /// anonymous request.
    pub async fn require_user(&self, login: &dyn LoginService) -> Result<UserId, Error> {
        let user_id = self.require_user_id()?;
        if login.current_user(&user_id).await?.is_some() {
            return Ok(user_id);
        }
        tracing::warn!(%user_id, "session refers to an unknown user; signing out");
        self.sign_out();
        Err(Error::unauthorized(SIGN_IN_REQUIRED_MESSAGE))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
