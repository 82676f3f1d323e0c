//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed entities for the Q&A site (users,
//! questions, answers, votes) and the use-case services that inbound
//! adapters call. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User, Question, Answer, Vote: aggregates with validated value types.
//! - AnswersService, QuestionsService, SignInService: driving-port services.

pub mod answer;
mod answers_service;
pub mod auth;
mod demo_seed;
pub mod error;
pub mod ports;
pub mod question;
mod questions_service;
mod repository_errors;
mod sign_in_service;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;
pub mod vote;

pub use self::answer::{ANSWER_BODY_MAX, Answer, AnswerBody, AnswerId, AnswerValidationError};
pub use self::answers_service::AnswersService;
pub use self::auth::{SignInCredentials, SignInValidationError};
pub use self::demo_seed::{
    DEMO_EMAIL, DEMO_PASSWORD, DemoDataSeeder, DemoSeedOutcome, DemoSeedingError,
};
pub use self::error::{Error, ErrorCode};
pub use self::question::{
    Question, QuestionBody, QuestionId, QuestionTitle, QuestionValidationError, question_path,
};
pub use self::questions_service::QuestionsService;
pub use self::sign_in_service::SignInService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, Email, User, UserAccount, UserId, UserValidationError};
pub use self::vote::{Vote, VoteDirection, VoteOutcome, VoteTally};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use qa_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
