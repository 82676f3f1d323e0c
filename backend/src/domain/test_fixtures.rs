//! Shared builders for domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    Answer, AnswerBody, AnswerId, DisplayName, Email, Question, QuestionBody, QuestionId,
    QuestionTitle, User, UserId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn confirmed_user(email: &str, name: &str) -> User {
    User::new(
        UserId::random(),
        Email::new(email).expect("fixture email"),
        DisplayName::new(name).expect("fixture display name"),
    )
    .confirmed(fixture_timestamp())
}

pub(crate) fn question_by(author_id: UserId) -> Question {
    Question {
        id: QuestionId::random(),
        author_id,
        title: QuestionTitle::new("How do I borrow twice?").expect("fixture title"),
        body: QuestionBody::new("The compiler says no.").expect("fixture body"),
        created_at: fixture_timestamp(),
    }
}

pub(crate) fn answer_on(question: &Question, author_id: UserId) -> Answer {
    Answer {
        id: AnswerId::random(),
        question_id: question.id,
        author_id,
        body: AnswerBody::new("Take a shared reference.").expect("fixture body"),
        created_at: fixture_timestamp(),
    }
}
