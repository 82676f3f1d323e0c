//! Questions asked by users.
//!
//! Questions are the parent aggregate for answers. Routes reference them by
//! [`QuestionId`]; the answers controller redirects back to the question page
//! after every successful mutation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum number of characters in a question title.
pub const QUESTION_TITLE_MAX: usize = 150;
/// Maximum number of characters in a question body.
pub const QUESTION_BODY_MAX: usize = 10_000;

/// Validation errors raised by question value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    InvalidId,
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyBody,
    BodyTooLong { max: usize },
}

impl fmt::Display for QuestionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "question id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "question title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "question title must be at most {max} characters")
            }
            Self::EmptyBody => write!(f, "question body must not be empty"),
            Self::BodyTooLong { max } => {
                write!(f, "question body must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for QuestionValidationError {}

/// Stable question identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(Uuid);

impl QuestionId {
    /// Parse a [`QuestionId`] from a path segment.
    ///
    /// # Examples
    /// ```
    /// use qa_backend::domain::QuestionId;
    ///
    /// let id = QuestionId::new("6f1c1d3e-0000-4000-8000-000000000001").expect("valid id");
    /// assert_eq!(id.to_string(), "6f1c1d3e-0000-4000-8000-000000000001");
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, QuestionValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| QuestionValidationError::InvalidId)
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

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty question title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionTitle(String);

impl QuestionTitle {
    /// Validate and construct a [`QuestionTitle`].
    pub fn new(title: impl AsRef<str>) -> Result<Self, QuestionValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QuestionValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > QUESTION_TITLE_MAX {
            return Err(QuestionValidationError::TitleTooLong {
                max: QUESTION_TITLE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for QuestionTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<QuestionTitle> for String {
    fn from(value: QuestionTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for QuestionTitle {
    type Error = QuestionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Trimmed, non-empty question body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionBody(String);

impl QuestionBody {
    /// Validate and construct a [`QuestionBody`].
    pub fn new(body: impl AsRef<str>) -> Result<Self, QuestionValidationError> {
        let trimmed = body.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QuestionValidationError::EmptyBody);
        }
        if trimmed.chars().count() > QUESTION_BODY_MAX {
            return Err(QuestionValidationError::BodyTooLong {
                max: QUESTION_BODY_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for QuestionBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<QuestionBody> for String {
    fn from(value: QuestionBody) -> Self {
        value.0
    }
}

impl TryFrom<String> for QuestionBody {
    type Error = QuestionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A question and its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub author_id: UserId,
    pub title: QuestionTitle,
    pub body: QuestionBody,
    pub created_at: DateTime<Utc>,
}

/// Redirect target for a question page.
///
/// # Examples
/// ```
/// use qa_backend::domain::{question_path, QuestionId};
///
/// let id = QuestionId::new("6f1c1d3e-0000-4000-8000-000000000001").unwrap();
/// assert_eq!(question_path(&id), "/questions/6f1c1d3e-0000-4000-8000-000000000001");
/// ```
pub fn question_path(id: &QuestionId) -> String {
    format!("/questions/{id}")
}
