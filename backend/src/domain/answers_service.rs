//! Answer posting and voting.
//!
//! [`AnswersService`] implements the [`AnswersCommand`] and [`AnswersQuery`]
//! driving ports on top of the question, answer, and vote repositories.
//! Authentication happens before these methods are called; every request
//! already carries the acting user.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{
    AnswerRepository, AnswersCommand, AnswersQuery, CastVoteRequest, CreateAnswerRequest,
    QuestionRepository, VoteRepository,
};
use super::repository_errors::{map_answer_error, map_question_error, map_vote_error};
use super::{Answer, AnswerId, Error, Question, QuestionId, Vote, VoteOutcome};

/// Answers service implementing the answer driving ports.
#[derive(Clone)]
pub struct AnswersService<Q, A, V> {
    questions: Arc<Q>,
    answers: Arc<A>,
    votes: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<Q, A, V> AnswersService<Q, A, V> {
    /// Create a new service with the given repositories and clock.
    pub fn new(questions: Arc<Q>, answers: Arc<A>, votes: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            questions,
            answers,
            votes,
            clock,
        }
    }
}

impl<Q, A, V> AnswersService<Q, A, V>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    V: VoteRepository,
{
    async fn require_question(&self, question_id: &QuestionId) -> Result<Question, Error> {
        self.questions
            .find_by_id(question_id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| Error::not_found(format!("question {question_id} not found")))
    }

    async fn require_answer(&self, answer_id: &AnswerId) -> Result<Answer, Error> {
        self.answers
            .find_by_id(answer_id)
            .await
            .map_err(map_answer_error)?
            .ok_or_else(|| Error::not_found(format!("answer {answer_id} not found")))
    }
}

#[async_trait]
impl<Q, A, V> AnswersCommand for AnswersService<Q, A, V>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    V: VoteRepository,
{
    async fn create_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error> {
        let question = self.require_question(&request.question_id).await?;
        let answer = Answer {
            id: AnswerId::random(),
            question_id: question.id,
            author_id: request.author_id,
            body: request.body,
            created_at: self.clock.utc(),
        };
        self.answers
            .insert(&answer)
            .await
            .map_err(map_answer_error)?;
        info!(
            answer_id = %answer.id,
            question_id = %answer.question_id,
            author_id = %answer.author_id,
            "answer created"
        );
        Ok(answer)
    }

    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteOutcome, Error> {
        let answer = self.require_answer(&request.answer_id).await?;
        let vote = Vote {
            answer_id: answer.id,
            voter_id: request.voter_id,
            direction: request.direction,
            cast_at: self.clock.utc(),
        };
        self.votes.record(&vote).await.map_err(map_vote_error)?;
        let tally = self
            .votes
            .tally(&answer.id)
            .await
            .map_err(map_vote_error)?;
        info!(
            answer_id = %answer.id,
            voter_id = %vote.voter_id,
            direction = %vote.direction,
            tally = %tally,
            "vote recorded"
        );
        Ok(VoteOutcome {
            answer_id: answer.id,
            question_id: answer.question_id,
            tally,
        })
    }
}

#[async_trait]
impl<Q, A, V> AnswersQuery for AnswersService<Q, A, V>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    V: VoteRepository,
{
    async fn answer_form(&self, question_id: &QuestionId) -> Result<Question, Error> {
        self.require_question(question_id).await
    }
}

#[cfg(test)]
#[path = "answers_service_tests.rs"]
mod tests;
