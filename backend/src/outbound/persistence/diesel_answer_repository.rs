//! PostgreSQL-backed `AnswerRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AnswerPersistenceError, AnswerRepository};
use crate::domain::{Answer, AnswerBody, AnswerId, QuestionId, UserId};

use super::diesel_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, violated_foreign_key,
};
use super::models::{AnswerRow, NewAnswerRow};
use super::pool::{DbPool, PoolError};
use super::schema::answers;

/// Diesel-backed implementation of the [`AnswerRepository`] port.
#[derive(Clone)]
pub struct DieselAnswerRepository {
    pool: DbPool,
}

impl DieselAnswerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AnswerPersistenceError {
    map_basic_pool_error(error, AnswerPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AnswerPersistenceError {
    map_basic_diesel_error(
        error,
        AnswerPersistenceError::query,
        AnswerPersistenceError::connection,
    )
}

const AUTHOR_FOREIGN_KEY: &str = "answers_author_id_fkey";

fn map_insert_error(answer: &Answer, error: diesel::result::Error) -> AnswerPersistenceError {
    match violated_foreign_key(&error) {
        Some(AUTHOR_FOREIGN_KEY) => {
            AnswerPersistenceError::missing_author(answer.author_id.to_string())
        }
        Some(_) => AnswerPersistenceError::missing_question(answer.question_id.to_string()),
        None => map_diesel_error(error),
    }
}

fn row_to_answer(row: AnswerRow) -> Result<Answer, AnswerPersistenceError> {
    let body = AnswerBody::new(row.body)
        .map_err(|err| AnswerPersistenceError::query(format!("stored answer is invalid: {err}")))?;
    Ok(Answer {
        id: AnswerId::from_uuid(row.id),
        question_id: QuestionId::from_uuid(row.question_id),
        author_id: UserId::from_uuid(row.author_id),
        body,
        created_at: row.created_at,
    })
}

#[async_trait]
impl AnswerRepository for DieselAnswerRepository {
    async fn insert(&self, answer: &Answer) -> Result<(), AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAnswerRow {
            id: *answer.id.as_uuid(),
            question_id: *answer.question_id.as_uuid(),
            author_id: *answer.author_id.as_uuid(),
            body: answer.body.as_ref(),
            created_at: answer.created_at,
        };
        diesel::insert_into(answers::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_insert_error(answer, err))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = answers::table
            .filter(answers::id.eq(id.as_uuid()))
            .select(AnswerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_answer).transpose()
    }

    async fn list_for_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Answer>, AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = answers::table
            .filter(answers::question_id.eq(question_id.as_uuid()))
            .order((answers::created_at.asc(), answers::id.asc()))
            .select(AnswerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_answer).collect()
    }

    async fn count(&self) -> Result<u64, AnswerPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = answers::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total)
            .map_err(|_| AnswerPersistenceError::query(format!("negative answer count {total}")))
    }
}
