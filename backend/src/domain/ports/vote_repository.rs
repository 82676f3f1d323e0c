//! Port abstraction for recording votes and reading tallies.
//!
//! Votes are append-only. Adapters must derive the tally from stored votes
//! rather than keep a mutable counter.
use async_trait::async_trait;

use crate::domain::{AnswerId, Vote, VoteTally};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by vote repository adapters.
    pub enum VotePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
        /// The answer vanished before the vote was written.
        MissingAnswer { answer_id: String } => "answer {answer_id} does not exist",
        /// The voter account no longer exists.
        MissingVoter { voter_id: String } => "voter {voter_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Append a vote.
    async fn record(&self, vote: &Vote) -> Result<(), VotePersistenceError>;

    /// Sum of vote values for `answer_id`; zero when nobody has voted.
    async fn tally(&self, answer_id: &AnswerId) -> Result<VoteTally, VotePersistenceError>;
}
