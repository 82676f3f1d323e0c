//! PostgreSQL-backed `VoteRepository` implementation using Diesel ORM.
//!
//! Votes are inserted as individual rows and the tally is computed with
//! `SUM(value)`, so concurrent votes on the same answer never lose updates.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VotePersistenceError, VoteRepository};
use crate::domain::{AnswerId, Vote, VoteTally};

use super::diesel_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, violated_foreign_key,
};
use super::models::NewAnswerVoteRow;
use super::pool::{DbPool, PoolError};
use super::schema::answer_votes;

/// Diesel-backed implementation of the [`VoteRepository`] port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VotePersistenceError {
    map_basic_pool_error(error, VotePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VotePersistenceError {
    map_basic_diesel_error(
        error,
        VotePersistenceError::query,
        VotePersistenceError::connection,
    )
}

const VOTER_FOREIGN_KEY: &str = "answer_votes_voter_id_fkey";

fn map_record_error(vote: &Vote, error: diesel::result::Error) -> VotePersistenceError {
    match violated_foreign_key(&error) {
        Some(VOTER_FOREIGN_KEY) => VotePersistenceError::missing_voter(vote.voter_id.to_string()),
        Some(_) => VotePersistenceError::missing_answer(vote.answer_id.to_string()),
        None => map_diesel_error(error),
    }
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn record(&self, vote: &Vote) -> Result<(), VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAnswerVoteRow {
            answer_id: *vote.answer_id.as_uuid(),
            voter_id: *vote.voter_id.as_uuid(),
            value: vote.direction.value(),
            created_at: vote.cast_at,
        };
        diesel::insert_into(answer_votes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_record_error(vote, err))?;
        Ok(())
    }

    async fn tally(&self, answer_id: &AnswerId) -> Result<VoteTally, VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: Option<i64> = answer_votes::table
            .filter(answer_votes::answer_id.eq(answer_id.as_uuid()))
            .select(diesel::dsl::sum(answer_votes::value))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(VoteTally::new(total.unwrap_or_default()))
    }
}
