//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AnswersCommand, AnswersQuery, LoginService, QuestionsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub answers: Arc<dyn AnswersCommand>,
    pub answers_query: Arc<dyn AnswersQuery>,
    pub questions: Arc<dyn QuestionsQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use qa_backend::domain::ports::FixtureLoginService;
    /// use qa_backend::domain::{AnswersService, QuestionsService};
    /// use qa_backend::inbound::http::state::HttpState;
    /// use qa_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let answers = Arc::new(AnswersService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let questions = Arc::new(QuestionsService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    /// ));
    /// let state = HttpState::new(Arc::new(FixtureLoginService), answers.clone(), answers, questions);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        answers: Arc<dyn AnswersCommand>,
        answers_query: Arc<dyn AnswersQuery>,
        questions: Arc<dyn QuestionsQuery>,
    ) -> Self {
        Self {
            login,
            answers,
            answers_query,
            questions,
        }
    }
}
