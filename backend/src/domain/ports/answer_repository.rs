//! Port abstraction for answer persistence.
use async_trait::async_trait;

use crate::domain::{Answer, AnswerId, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by answer repository adapters.
    pub enum AnswerPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "answer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "answer repository query failed: {message}",
        /// The parent question vanished before the answer was written.
        MissingQuestion { question_id: String } => "question {question_id} does not exist",
        /// The author account no longer exists.
        MissingAuthor { author_id: String } => "author {author_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Persist a new answer.
    async fn insert(&self, answer: &Answer) -> Result<(), AnswerPersistenceError>;

    /// Fetch an answer by identifier.
    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerPersistenceError>;

    /// Answers of a question in creation order.
    async fn list_for_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerPersistenceError>;

    /// Total number of stored answers.
    async fn count(&self) -> Result<u64, AnswerPersistenceError>;
}
