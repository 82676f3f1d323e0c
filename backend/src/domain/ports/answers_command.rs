//! Driving port for answer mutations: posting answers and casting votes.

use async_trait::async_trait;

use crate::domain::{
    Answer, AnswerBody, AnswerId, Error, QuestionId, UserId, VoteDirection, VoteOutcome,
};

/// Request to post an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAnswerRequest {
    /// Question being answered.
    pub question_id: QuestionId,
    /// Signed-in user posting the answer.
    pub author_id: UserId,
    /// Validated answer text.
    pub body: AnswerBody,
}

/// Request to vote on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastVoteRequest {
    pub answer_id: AnswerId,
    /// Signed-in user casting the vote.
    pub voter_id: UserId,
    pub direction: VoteDirection,
}

/// Domain use-case port for answer mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswersCommand: Send + Sync {
    /// Persist exactly one answer linked to the question and author.
    ///
    /// # Errors
    /// `not_found` when the question does not exist.
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error>;

    /// Record one vote and return the new tally with the parent question.
    ///
    /// # Errors
    /// `not_found` when the answer does not exist.
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteOutcome, Error>;
}
