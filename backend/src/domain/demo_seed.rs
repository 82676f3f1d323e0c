//! Demo data seeding.
//!
//! Ensures a confirmed demo account and one question exist so a fresh local
//! server has something to answer and vote on.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, QuestionPersistenceError, QuestionRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    DisplayName, Email, Question, QuestionBody, QuestionId, QuestionTitle,
    QuestionValidationError, User, UserAccount, UserId, UserValidationError,
};

/// Email of the seeded demo account.
pub const DEMO_EMAIL: &str = "demo@example.com";
/// Password of the seeded demo account.
pub const DEMO_PASSWORD: &str = "password";
const DEMO_DISPLAY_NAME: &str = "Demo User";
const DEMO_QUESTION_TITLE: &str = "How do I share data between threads?";
const DEMO_QUESTION_BODY: &str =
    "I want several worker threads to read the same configuration. What should I wrap it in?";

/// Result of attempting to seed demo data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSeedOutcome {
    /// A new demo account and question were written.
    Seeded {
        user_id: UserId,
        question_id: QuestionId,
    },
    /// The demo account already existed; nothing was written.
    AlreadyPresent,
}

/// Errors raised while seeding demo data.
#[derive(Debug, Error)]
pub enum DemoSeedingError {
    #[error("demo user failed validation: {0}")]
    User(#[from] UserValidationError),
    #[error("demo question failed validation: {0}")]
    Question(#[from] QuestionValidationError),
    #[error("demo password could not be hashed: {0}")]
    Hash(#[from] PasswordHashError),
    #[error("demo user persistence error: {0}")]
    UserPersistence(#[from] UserPersistenceError),
    #[error("demo question persistence error: {0}")]
    QuestionPersistence(#[from] QuestionPersistenceError),
}

/// Service that writes the demo account and question.
#[derive(Clone)]
pub struct DemoDataSeeder<U, Q, H> {
    users: Arc<U>,
    questions: Arc<Q>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, Q, H> DemoDataSeeder<U, Q, H> {
    /// Create a new seeder.
    pub fn new(users: Arc<U>, questions: Arc<Q>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            questions,
            hasher,
            clock,
        }
    }
}

impl<U, Q, H> DemoDataSeeder<U, Q, H>
where
    U: UserRepository,
    Q: QuestionRepository,
    H: PasswordHasher,
{
    /// Seed the demo account and question unless the account already exists.
    ///
    /// # Errors
    ///
    /// Returns [`DemoSeedingError`] if hashing or persistence fails.
    pub async fn seed(&self) -> Result<DemoSeedOutcome, DemoSeedingError> {
        let email = Email::new(DEMO_EMAIL)?;
        if self.users.find_account_by_email(&email).await?.is_some() {
            info!(email = DEMO_EMAIL, "demo data already present");
            return Ok(DemoSeedOutcome::AlreadyPresent);
        }

        let now = self.clock.utc();
        let user = User::new(UserId::random(), email, DisplayName::new(DEMO_DISPLAY_NAME)?)
            .confirmed(now);
        let user_id = *user.id();
        let account = UserAccount {
            user,
            password_hash: self.hasher.hash(DEMO_PASSWORD)?,
        };
        self.users.insert_account(&account).await?;

        let question = Question {
            id: QuestionId::random(),
            author_id: user_id,
            title: QuestionTitle::new(DEMO_QUESTION_TITLE)?,
            body: QuestionBody::new(DEMO_QUESTION_BODY)?,
            created_at: now,
        };
        self.questions.insert(&question).await?;

        info!(%user_id, question_id = %question.id, "demo data seeded");
        Ok(DemoSeedOutcome::Seeded {
            user_id,
            question_id: question.id,
        })
    }
}
