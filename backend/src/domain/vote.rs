//! Votes on answers.
//!
//! Every vote is an immutable row attributed to the voter. The tally of an
//! answer is the sum of its vote values, so concurrent votes never overwrite
//! each other and each call moves the tally by exactly one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnswerId, QuestionId, UserId};

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Signed contribution of this vote to the tally.
    ///
    /// # Examples
    /// ```
    /// use qa_backend::domain::VoteDirection;
    ///
    /// assert_eq!(VoteDirection::Up.value(), 1);
    /// assert_eq!(VoteDirection::Down.value(), -1);
    /// ```
    pub fn value(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// Recover a direction from a stored value.
    pub fn from_value(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Up),
            -1 => Some(Self::Down),
            _ => None,
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// A recorded vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub answer_id: AnswerId,
    pub voter_id: UserId,
    pub direction: VoteDirection,
    pub cast_at: DateTime<Utc>,
}

/// Net vote count of an answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTally(i64);

impl VoteTally {
    /// Wrap a raw tally.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw tally value.
    pub fn value(self) -> i64 {
        self.0
    }

    /// Tally after applying one more vote.
    #[must_use]
    pub fn apply(self, direction: VoteDirection) -> Self {
        Self(self.0 + i64::from(direction.value()))
    }
}

impl fmt::Display for VoteTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of casting a vote, used to build redirects and XHR payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub answer_id: AnswerId,
    pub question_id: QuestionId,
    pub tally: VoteTally,
}
