//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types re-run validation so corrupt rows surface as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{answer_votes, answers, questions, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub confirmed_at: Option<DateTime<Utc>>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
    pub confirmed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub(crate) struct NewQuestionRow<'a> {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: &'a str,
    pub body: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnswerRow {
    pub id: Uuid,
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answers)]
pub(crate) struct NewAnswerRow<'a> {
    pub id: Uuid,
    pub question_id: Uuid,
    pub author_id: Uuid,
    pub body: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Insertable vote; `id` is assigned by the database sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answer_votes)]
pub(crate) struct NewAnswerVoteRow {
    pub answer_id: Uuid,
    pub voter_id: Uuid,
    pub value: i16,
    pub created_at: DateTime<Utc>,
}
