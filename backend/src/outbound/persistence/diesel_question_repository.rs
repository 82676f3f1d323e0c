//! PostgreSQL-backed `QuestionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{QuestionPersistenceError, QuestionRepository};
use crate::domain::{Question, QuestionBody, QuestionId, QuestionTitle, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewQuestionRow, QuestionRow};
use super::pool::{DbPool, PoolError};
use super::schema::questions;

/// Diesel-backed implementation of the [`QuestionRepository`] port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QuestionPersistenceError {
    map_basic_pool_error(error, QuestionPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> QuestionPersistenceError {
    map_basic_diesel_error(
        error,
        QuestionPersistenceError::query,
        QuestionPersistenceError::connection,
    )
}

fn row_to_question(row: QuestionRow) -> Result<Question, QuestionPersistenceError> {
    let invalid =
        |err| QuestionPersistenceError::query(format!("stored question is invalid: {err}"));
    Ok(Question {
        id: QuestionId::from_uuid(row.id),
        author_id: UserId::from_uuid(row.author_id),
        title: QuestionTitle::new(row.title).map_err(invalid)?,
        body: QuestionBody::new(row.body).map_err(invalid)?,
        created_at: row.created_at,
    })
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn insert(&self, question: &Question) -> Result<(), QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewQuestionRow {
            id: *question.id.as_uuid(),
            author_id: *question.author_id.as_uuid(),
            title: question.title.as_ref(),
            body: question.body.as_ref(),
            created_at: question.created_at,
        };
        diesel::insert_into(questions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &QuestionId,
    ) -> Result<Option<Question>, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = questions::table
            .filter(questions::id.eq(id.as_uuid()))
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_question).transpose()
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Question>, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = questions::table
            .order(questions::created_at.desc())
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .select(QuestionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_question).collect()
    }
}
