//! Answers posted against questions.
//!
//! An answer belongs to exactly one question and one author from the moment
//! it is created. Its vote tally is derived from recorded votes (see
//! [`super::vote`]).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::{Error, QuestionId, UserId};

/// Maximum number of characters in an answer body.
pub const ANSWER_BODY_MAX: usize = 10_000;

/// Validation errors raised when constructing answer values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValidationError {
    /// The answer id is not a UUID.
    InvalidId,
    /// The body is empty once trimmed.
    EmptyBody,
    /// The body exceeds [`ANSWER_BODY_MAX`] characters.
    BodyTooLong { max: usize },
}

impl AnswerValidationError {
    /// Machine-readable code reported in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyBody => "empty",
            Self::BodyTooLong { .. } => "too_long",
        }
    }
}

impl fmt::Display for AnswerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "answer id must be a valid UUID"),
            Self::EmptyBody => write!(f, "answer body must not be empty"),
            Self::BodyTooLong { max } => {
                write!(f, "answer body must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AnswerValidationError {}

impl From<AnswerValidationError> for Error {
    fn from(value: AnswerValidationError) -> Self {
        let field = match value {
            AnswerValidationError::InvalidId => "id",
            AnswerValidationError::EmptyBody | AnswerValidationError::BodyTooLong { .. } => "body",
        };
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": field, "code": value.code() }))
    }
}

/// Stable answer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerId(Uuid);

impl AnswerId {
    /// Parse an [`AnswerId`] from a path segment.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AnswerValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| AnswerValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answer text.
///
/// ## Invariants
/// - Leading and trailing whitespace is removed.
/// - Non-empty and at most [`ANSWER_BODY_MAX`] characters.
///
/// # Examples
/// ```
/// use qa_backend::domain::{AnswerBody, AnswerValidationError};
///
/// let body = AnswerBody::new("  Use a borrow.  ").expect("valid body");
/// assert_eq!(body.as_ref(), "Use a borrow.");
/// assert_eq!(AnswerBody::new(" ").unwrap_err(), AnswerValidationError::EmptyBody);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnswerBody(String);

impl AnswerBody {
    /// Validate and construct an [`AnswerBody`].
    pub fn new(body: impl AsRef<str>) -> Result<Self, AnswerValidationError> {
        let trimmed = body.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AnswerValidationError::EmptyBody);
        }
        if trimmed.chars().count() > ANSWER_BODY_MAX {
            return Err(AnswerValidationError::BodyTooLong {
                max: ANSWER_BODY_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for AnswerBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AnswerBody> for String {
    fn from(value: AnswerBody) -> Self {
        value.0
    }
}

impl TryFrom<String> for AnswerBody {
    type Error = AnswerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A persisted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub author_id: UserId,
    pub body: AnswerBody,
    pub created_at: DateTime<Utc>,
}
