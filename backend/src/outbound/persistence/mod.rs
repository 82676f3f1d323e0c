//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map onto each port's error
//!   enum through `diesel_error_mapping`.
//!
//! # Example
//!
//! ```ignore
//! use qa_backend::outbound::persistence::{DbPool, DieselAnswerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/qa")).await?;
//! let answers = DieselAnswerRepository::new(pool);
//! ```

mod diesel_answer_repository;
mod diesel_error_mapping;
mod diesel_question_repository;
mod diesel_user_repository;
mod diesel_vote_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_answer_repository::DieselAnswerRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vote_repository::DieselVoteRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
