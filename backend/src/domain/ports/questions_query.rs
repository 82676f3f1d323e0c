//! Driving port for public question pages.

use async_trait::async_trait;

use crate::domain::{Answer, Error, Question, QuestionId, VoteTally};

/// An answer with its author's display name and current tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerWithTally {
    pub answer: Answer,
    pub author_name: String,
    pub tally: VoteTally,
}

/// Everything the question page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub question: Question,
    pub author_name: String,
    /// Answers in creation order.
    pub answers: Vec<AnswerWithTally>,
}

/// Domain use-case port for question pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionsQuery: Send + Sync {
    /// Most recent questions, newest first.
    async fn recent_questions(&self, limit: usize) -> Result<Vec<Question>, Error>;

    /// A question with its answers and tallies.
    ///
    /// # Errors
    /// `not_found` when the question does not exist.
    async fn question_page(&self, question_id: &QuestionId) -> Result<QuestionPage, Error>;
}
