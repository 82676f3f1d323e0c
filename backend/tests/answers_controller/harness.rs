//! Server harness and shared world for the answers controller scenarios.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping the [`WorldFixture`] stops
//! the server even if a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use chrono::Utc;
use mockable::{Clock, DefaultClock};
use qa_backend::Trace;
use qa_backend::domain::ports::AnswerRepository;
use qa_backend::domain::{
    Answer, AnswerBody, AnswerId, AnswersService, DemoDataSeeder, DemoSeedOutcome, QuestionId,
    QuestionsService, SignInService, UserId,
};
use qa_backend::inbound::http::answers::{create_answer, downvote, new_answer, upvote};
use qa_backend::inbound::http::questions::show;
use qa_backend::inbound::http::session_config::SessionSettings;
use qa_backend::inbound::http::state::HttpState;
use qa_backend::inbound::http::users::sign_in;
use qa_backend::outbound::auth::Argon2PasswordHasher;
use qa_backend::outbound::memory::InMemoryStore;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// Response details kept for `Then` steps.
#[derive(Debug, Default)]
pub(crate) struct LastResponse {
    pub(crate) status: u16,
    pub(crate) location: Option<String>,
    pub(crate) body: String,
}

impl LastResponse {
    pub(crate) fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("JSON body")
    }
}

pub(crate) struct AnswersWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) store: Arc<InMemoryStore>,
    pub(crate) question_id: Option<QuestionId>,
    pub(crate) answer_id: Option<AnswerId>,
    pub(crate) baseline_answers: u64,
    pub(crate) session_cookie: Option<String>,
    pub(crate) last: Option<LastResponse>,
}

impl AnswersWorld {
    pub(crate) fn question_id(&self) -> QuestionId {
        self.question_id.expect("seeded question")
    }

    pub(crate) fn answer_id(&self) -> AnswerId {
        self.answer_id.expect("seeded answer")
    }

    pub(crate) fn last(&self) -> &LastResponse {
        self.last.as_ref().expect("a request was made")
    }
}

pub(crate) type SharedWorld = Rc<RefCell<AnswersWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Run `operation` on the world's runtime. The future must not borrow the
/// world.
pub(crate) fn block_on<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn http_state(store: &Arc<InMemoryStore>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let login = Arc::new(SignInService::new(
        store.clone(),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let answers = Arc::new(AnswersService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        clock,
    ));
    let questions = Arc::new(QuestionsService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    HttpState::new(login, answers.clone(), answers, questions)
}

fn spawn_server(state: HttpState) -> Result<(String, ServerHandle), String> {
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .wrap(session.middleware())
            .service(sign_in)
            .service(show)
            .service(new_answer)
            .service(create_answer)
            .service(upvote)
            .service(downvote)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

/// Seed user U, question Q by U, and answer A on Q by U.
pub(crate) async fn seed_user_question_answer(
    store: Arc<InMemoryStore>,
) -> (UserId, QuestionId, AnswerId) {
    let seeder = DemoDataSeeder::new(
        store.clone(),
        store.clone(),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(DefaultClock),
    );
    let DemoSeedOutcome::Seeded {
        user_id,
        question_id,
    } = seeder.seed().await.expect("seed demo data")
    else {
        panic!("store should start empty");
    };
    let answer = Answer {
        id: AnswerId::random(),
        question_id,
        author_id: user_id,
        body: AnswerBody::new("Wrap it in an Arc.").expect("answer body"),
        created_at: Utc::now(),
    };
    AnswerRepository::insert(&*store, &answer)
        .await
        .expect("insert answer");
    (user_id, question_id, answer.id)
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let store = Arc::new(InMemoryStore::new());
    let state = http_state(&store);

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_server(state) })
        .expect("server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(AnswersWorld {
            runtime,
            local,
            base_url,
            server,
            store,
            question_id: None,
            answer_id: None,
            baseline_answers: 0,
            session_cookie: None,
            last: None,
        })),
    }
}
