//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use async_trait::async_trait;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::header;

use crate::domain::ports::{FixtureLoginService, LoginService, UserRepository};
use crate::domain::test_fixtures::fixture_timestamp;
use crate::domain::{
    AnswersService, DisplayName, Email, Error, QuestionsService, SignInCredentials, User,
    UserAccount, UserId,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// `Location` header of a redirect response.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Fixture credentials whose sessions are resolved against the store.
///
/// Signing in always succeeds for the fixture account, but requests only act
/// on its behalf once [`seed_fixture_user`] has stored it.
struct StoreBackedLogin {
    store: Arc<InMemoryStore>,
}

#[async_trait]
impl LoginService for StoreBackedLogin {
    async fn authenticate(&self, credentials: &SignInCredentials) -> Result<UserId, Error> {
        FixtureLoginService.authenticate(credentials).await
    }

    async fn current_user(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        UserRepository::find_by_id(&*self.store, user_id)
            .await
            .map_err(|err| Error::internal(err.to_string()))
    }
}

/// Store the confirmed account that fixture sign-in resolves to.
pub async fn seed_fixture_user(store: &InMemoryStore) -> UserId {
    let id = UserId::new(FixtureLoginService::USER_ID).expect("fixture id");
    let user = User::new(
        id,
        Email::new("ada@example.com").expect("fixture email"),
        DisplayName::new("Ada Lovelace").expect("fixture display name"),
    )
    .confirmed(fixture_timestamp());
    UserRepository::insert_account(
        store,
        &UserAccount {
            user,
            password_hash: "$argon2id$unused".to_owned(),
        },
    )
    .await
    .expect("seed fixture user");
    id
}

/// HTTP state wired to a shared in-memory store and the fixture login.
pub fn memory_state(store: &Arc<InMemoryStore>) -> HttpState {
    let answers = Arc::new(AnswersService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        crate::domain::test_fixtures::fixture_clock(),
    ));
    let questions = Arc::new(QuestionsService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    HttpState::new(
        Arc::new(StoreBackedLogin {
            store: store.clone(),
        }),
        answers.clone(),
        answers,
        questions,
    )
}
