//! Builders wiring repositories into the services behind [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use qa_backend::domain::ports::{
    AnswerRepository, PasswordHasher, QuestionRepository, UserRepository, VoteRepository,
};
use qa_backend::domain::{
    AnswersService, DemoDataSeeder, DemoSeedOutcome, QuestionsService, SignInService,
};
use qa_backend::inbound::http::state::HttpState;
use qa_backend::outbound::auth::Argon2PasswordHasher;
use qa_backend::outbound::memory::InMemoryStore;
use qa_backend::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselQuestionRepository, DieselUserRepository,
    DieselVoteRepository, PoolConfig, run_pending_migrations,
};
use qa_backend::settings::AppSettings;

use super::StartupError;

/// Repositories behind the four driven ports.
struct Repositories<U, Q, A, V> {
    users: Arc<U>,
    questions: Arc<Q>,
    answers: Arc<A>,
    votes: Arc<V>,
}

impl<U, Q, A, V> Repositories<U, Q, A, V>
where
    U: UserRepository + 'static,
    Q: QuestionRepository + 'static,
    A: AnswerRepository + 'static,
    V: VoteRepository + 'static,
{
    async fn seed_demo_data<H: PasswordHasher>(
        &self,
        hasher: Arc<H>,
        clock: Arc<dyn Clock>,
    ) -> Result<(), StartupError> {
        let seeder = DemoDataSeeder::new(self.users.clone(), self.questions.clone(), hasher, clock);
        match seeder.seed().await? {
            DemoSeedOutcome::Seeded { question_id, .. } => {
                info!(%question_id, "demo question available");
            }
            DemoSeedOutcome::AlreadyPresent => {}
        }
        Ok(())
    }

    async fn into_http_state(self, settings: &AppSettings) -> Result<HttpState, StartupError> {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let hasher = Arc::new(Argon2PasswordHasher::new());
        if settings.seed_demo_data {
            self.seed_demo_data(hasher.clone(), clock.clone()).await?;
        }

        let Self {
            users,
            questions,
            answers,
            votes,
        } = self;
        let login = Arc::new(SignInService::new(users.clone(), hasher));
        let answers_service = Arc::new(AnswersService::new(
            questions.clone(),
            answers.clone(),
            votes.clone(),
            clock,
        ));
        let questions_service = Arc::new(QuestionsService::new(questions, answers, votes, users));
        Ok(HttpState::new(
            login,
            answers_service.clone(),
            answers_service,
            questions_service,
        ))
    }
}

/// Build handler state backed by Postgres when a database URL is set,
/// otherwise by a process-local in-memory store.
///
/// # Errors
///
/// Returns [`StartupError`] when migrations, the pool, or demo seeding fail.
pub(crate) async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url).await?;
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.database_max_connections()),
            )
            .await?;
            info!("using postgres persistence");
            Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
                answers: Arc::new(DieselAnswerRepository::new(pool.clone())),
                votes: Arc::new(DieselVoteRepository::new(pool)),
            }
            .into_http_state(settings)
            .await
        }
        None => {
            info!("no database configured; using in-memory store");
            let store = Arc::new(InMemoryStore::new());
            Repositories {
                users: store.clone(),
                questions: store.clone(),
                answers: store.clone(),
                votes: store,
            }
            .into_http_state(settings)
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn in_memory_settings(seed_demo_data: bool) -> AppSettings {
        AppSettings {
            bind_addr: None,
            database_url: None,
            database_max_connections: None,
            seed_demo_data,
        }
    }

    #[rstest]
    #[case(false, 0)]
    #[case(true, 1)]
    #[tokio::test]
    async fn in_memory_state_honours_demo_seeding(#[case] seed: bool, #[case] expected: usize) {
        let state = build_http_state(&in_memory_settings(seed))
            .await
            .expect("in-memory state");

        let questions = state
            .questions
            .recent_questions(10)
            .await
            .expect("recent questions");
        assert_eq!(questions.len(), expected);
    }
}
