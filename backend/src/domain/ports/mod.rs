//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are called by
//! inbound adapters. Driven ports (`*Repository`, [`PasswordHasher`]) are
//! implemented by outbound adapters and expose typed errors generated with
//! `define_port_error!`.

mod macros;
pub(crate) use macros::define_port_error;

mod answer_repository;
mod answers_command;
mod answers_query;
mod login_service;
mod password_hasher;
mod question_repository;
mod questions_query;
mod user_repository;
mod vote_repository;

#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answer_repository::{AnswerPersistenceError, AnswerRepository};
#[cfg(test)]
pub use answers_command::MockAnswersCommand;
pub use answers_command::{AnswersCommand, CastVoteRequest, CreateAnswerRequest};
#[cfg(test)]
pub use answers_query::MockAnswersQuery;
pub use answers_query::AnswersQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FixtureLoginService, INVALID_CREDENTIALS_MESSAGE, LoginService, SIGN_IN_REQUIRED_MESSAGE,
    UNCONFIRMED_MESSAGE,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{QuestionPersistenceError, QuestionRepository};
#[cfg(test)]
pub use questions_query::MockQuestionsQuery;
pub use questions_query::{AnswerWithTally, QuestionPage, QuestionsQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{VotePersistenceError, VoteRepository};
