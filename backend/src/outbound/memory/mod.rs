//! In-memory implementation of every repository port.
//!
//! Used when no database URL is configured and by handler and behaviour
//! tests. It mirrors the relational constraints of the Postgres schema: emails
//! are unique and answers must reference an existing question.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AnswerPersistenceError, AnswerRepository, QuestionPersistenceError, QuestionRepository,
    UserPersistenceError, UserRepository, VotePersistenceError, VoteRepository,
};
use crate::domain::{
    Answer, AnswerId, Email, Question, QuestionId, User, UserAccount, UserId, Vote, VoteTally,
};

#[derive(Debug, Default)]
struct State {
    accounts: Vec<UserAccount>,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    votes: Vec<Vote>,
}

/// Shared in-memory store implementing all Q&A repository ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, State>> {
        self.state.lock().ok()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_account(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        let email = account.user.email();
        if state.accounts.iter().any(|a| a.user.email() == email) {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        state.accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state
            .accounts
            .iter()
            .find(|a| a.user.id() == id)
            .map(|a| a.user.clone()))
    }

    async fn find_account_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state
            .accounts
            .iter()
            .find(|a| a.user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn insert(&self, question: &Question) -> Result<(), QuestionPersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| QuestionPersistenceError::query(POISONED))?;
        state.questions.push(question.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| QuestionPersistenceError::query(POISONED))?;
        Ok(state.questions.iter().find(|q| q.id == *id).cloned())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Question>, QuestionPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| QuestionPersistenceError::query(POISONED))?;
        let mut questions = state.questions.clone();
        // Stable sort keeps insertion order for equal timestamps; reverse it
        // afterwards so the newest insert wins ties.
        questions.reverse();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        questions.truncate(limit);
        Ok(questions)
    }
}

#[async_trait]
impl AnswerRepository for InMemoryStore {
    async fn insert(&self, answer: &Answer) -> Result<(), AnswerPersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| AnswerPersistenceError::query(POISONED))?;
        if !state.questions.iter().any(|q| q.id == answer.question_id) {
            return Err(AnswerPersistenceError::missing_question(
                answer.question_id.to_string(),
            ));
        }
        state.answers.push(answer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| AnswerPersistenceError::query(POISONED))?;
        Ok(state.answers.iter().find(|a| a.id == *id).cloned())
    }

    async fn list_for_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| AnswerPersistenceError::query(POISONED))?;
        Ok(state
            .answers
            .iter()
            .filter(|a| a.question_id == *question_id)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, AnswerPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| AnswerPersistenceError::query(POISONED))?;
        Ok(state.answers.len() as u64)
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn record(&self, vote: &Vote) -> Result<(), VotePersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| VotePersistenceError::query(POISONED))?;
        state.votes.push(vote.clone());
        Ok(())
    }

    async fn tally(&self, answer_id: &AnswerId) -> Result<VoteTally, VotePersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| VotePersistenceError::query(POISONED))?;
        let total = state
            .votes
            .iter()
            .filter(|v| v.answer_id == *answer_id)
            .map(|v| i64::from(v.direction.value()))
            .sum();
        Ok(VoteTally::new(total))
    }
}
