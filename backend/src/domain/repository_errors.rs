//! Mapping from driven-port persistence errors to domain errors.
//!
//! Connection failures surface as `service_unavailable`; everything else is
//! an internal error whose message is redacted at the HTTP boundary.

use super::Error;
use super::ports::{
    AnswerPersistenceError, QuestionPersistenceError, SIGN_IN_REQUIRED_MESSAGE,
    UserPersistenceError, VotePersistenceError,
};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("an account already exists for {email}"))
        }
    }
}

pub(crate) fn map_question_error(error: QuestionPersistenceError) -> Error {
    match error {
        QuestionPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionPersistenceError::Query { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
    }
}

pub(crate) fn map_answer_error(error: AnswerPersistenceError) -> Error {
    match error {
        AnswerPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("answer repository unavailable: {message}"))
        }
        AnswerPersistenceError::Query { message } => {
            Error::internal(format!("answer repository error: {message}"))
        }
        AnswerPersistenceError::MissingQuestion { .. } => Error::not_found("question not found"),
        AnswerPersistenceError::MissingAuthor { .. } => {
            Error::unauthorized(SIGN_IN_REQUIRED_MESSAGE)
        }
    }
}

pub(crate) fn map_vote_error(error: VotePersistenceError) -> Error {
    match error {
        VotePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("vote repository unavailable: {message}"))
        }
        VotePersistenceError::Query { message } => {
            Error::internal(format!("vote repository error: {message}"))
        }
        VotePersistenceError::MissingAnswer { .. } => Error::not_found("answer not found"),
        VotePersistenceError::MissingVoter { .. } => Error::unauthorized(SIGN_IN_REQUIRED_MESSAGE),
    }
}
