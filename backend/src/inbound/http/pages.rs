//! HTML view models rendered with Askama.
//!
//! Templates live in `backend/templates/`. View models hold plain strings so
//! templates never reach into domain types.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use askama::Template;

use crate::domain::ports::QuestionPage;
use crate::domain::{AnswerId, Error, Question, QuestionId, VoteDirection, question_path};

/// Path of the answer form for a question.
pub fn new_answer_path(question_id: &QuestionId) -> String {
    format!("{}/answers/new", question_path(question_id))
}

/// Path answers are posted to.
pub fn answers_path(question_id: &QuestionId) -> String {
    format!("{}/answers", question_path(question_id))
}

/// Path of the vote action for an answer.
pub fn vote_path(answer_id: &AnswerId, direction: VoteDirection) -> String {
    format!("/answers/{answer_id}/{direction}vote")
}

/// Render `page` as an HTML response with `status`.
pub fn render<T: Template>(page: &T, status: StatusCode) -> Result<HttpResponse, Error> {
    let html = page
        .render()
        .map_err(|err| Error::internal(format!("failed to render template: {err}")))?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(html))
}

#[derive(Template)]
#[template(path = "sign_in.html")]
pub struct SignInPage<'a> {
    pub signed_in: bool,
    pub email: &'a str,
    pub error: &'a str,
}

/// One entry of the question list.
pub struct QuestionLink {
    pub title: String,
    pub path: String,
}

#[derive(Template)]
#[template(path = "questions_index.html")]
pub struct QuestionsIndexPage {
    pub signed_in: bool,
    pub questions: Vec<QuestionLink>,
}

impl QuestionsIndexPage {
    pub fn new(signed_in: bool, questions: &[Question]) -> Self {
        let questions = questions
            .iter()
            .map(|q| QuestionLink {
                title: q.title.as_ref().to_owned(),
                path: question_path(&q.id),
            })
            .collect();
        Self {
            signed_in,
            questions,
        }
    }
}

/// An answer as shown on the question page.
pub struct AnswerView {
    pub id: String,
    pub body: String,
    pub author: String,
    pub votes: i64,
    pub upvote_path: String,
    pub downvote_path: String,
}

#[derive(Template)]
#[template(path = "question_show.html")]
pub struct QuestionShowPage {
    pub signed_in: bool,
    pub title: String,
    pub body: String,
    pub author: String,
    pub answers: Vec<AnswerView>,
    pub new_answer_path: String,
}

impl QuestionShowPage {
    pub fn new(signed_in: bool, page: QuestionPage) -> Self {
        let QuestionPage {
            question,
            author_name,
            answers,
        } = page;
        let answers = answers
            .into_iter()
            .map(|entry| AnswerView {
                id: entry.answer.id.to_string(),
                upvote_path: vote_path(&entry.answer.id, VoteDirection::Up),
                downvote_path: vote_path(&entry.answer.id, VoteDirection::Down),
                body: String::from(entry.answer.body),
                author: entry.author_name,
                votes: entry.tally.value(),
            })
            .collect();
        Self {
            signed_in,
            new_answer_path: new_answer_path(&question.id),
            title: String::from(question.title),
            body: String::from(question.body),
            author: author_name,
            answers,
        }
    }
}

#[derive(Template)]
#[template(path = "answer_new.html")]
pub struct AnswerFormPage {
    pub signed_in: bool,
    pub question_title: String,
    pub question_path: String,
    pub create_path: String,
}

impl AnswerFormPage {
    pub fn new(question: &Question) -> Self {
        Self {
            signed_in: true,
            question_title: question.title.as_ref().to_owned(),
            question_path: question_path(&question.id),
            create_path: answers_path(&question.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::AnswerWithTally;
    use crate::domain::test_fixtures::{answer_on, question_by};
    use crate::domain::{UserId, VoteTally};
    use rstest::rstest;

    #[rstest]
    #[case(VoteDirection::Up, "upvote")]
    #[case(VoteDirection::Down, "downvote")]
    fn vote_paths_name_the_action(#[case] direction: VoteDirection, #[case] action: &str) {
        let id = AnswerId::random();
        assert_eq!(vote_path(&id, direction), format!("/answers/{id}/{action}"));
    }

    #[rstest]
    fn question_page_escapes_user_content() {
        let author = UserId::random();
        let question = question_by(author);
        let mut answer = answer_on(&question, author);
        answer.body = crate::domain::AnswerBody::new("<script>alert(1)</script>").expect("body");
        let page = QuestionShowPage::new(
            false,
            QuestionPage {
                question,
                author_name: "ada".to_owned(),
                answers: vec![AnswerWithTally {
                    answer,
                    author_name: "grace".to_owned(),
                    tally: VoteTally::new(4),
                }],
            },
        );

        let html = page.render().expect("render");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"<span class="tally">4</span>"#));
        assert!(html.contains("answered by grace"));
    }

    #[rstest]
    fn sign_in_page_shows_error_only_when_set() {
        let clean = SignInPage {
            signed_in: false,
            email: "",
            error: "",
        }
        .render()
        .expect("render");
        assert!(!clean.contains("role=\"alert\""));

        let failed = SignInPage {
            signed_in: false,
            email: "ada@example.com",
            error: "invalid email or password",
        }
        .render()
        .expect("render");
        assert!(failed.contains("invalid email or password"));
        assert!(failed.contains("value=\"ada@example.com\""));
    }
}
