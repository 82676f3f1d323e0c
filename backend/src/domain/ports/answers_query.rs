//! Driving port for answer read models.

use async_trait::async_trait;

use crate::domain::{Error, Question, QuestionId};

/// Domain use-case port backing the answer form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswersQuery: Send + Sync {
    /// Load the question an answer form is rendered for.
    ///
    /// # Errors
    /// `not_found` when the question does not exist.
    async fn answer_form(&self, question_id: &QuestionId) -> Result<Question, Error>;
}
