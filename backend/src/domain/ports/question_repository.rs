//! Port abstraction for question persistence.
use async_trait::async_trait;

use crate::domain::{Question, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by question repository adapters.
    pub enum QuestionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "question repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist a new question.
    async fn insert(&self, question: &Question) -> Result<(), QuestionPersistenceError>;

    /// Fetch a question by identifier.
    async fn find_by_id(&self, id: &QuestionId)
    -> Result<Option<Question>, QuestionPersistenceError>;

    /// Most recently created questions first, at most `limit` of them.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Question>, QuestionPersistenceError>;
}
