//! Public question pages.
//!
//! ```text
//! GET /                recent questions
//! GET /questions/{id}  a question with its answers and vote tallies
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};

use crate::domain::{Error, QuestionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pages::{QuestionShowPage, QuestionsIndexPage, render};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Number of questions listed on the home page.
pub const RECENT_QUESTIONS_LIMIT: usize = 30;

/// Parse a question id from a path segment; anything malformed is unknown.
pub(crate) fn parse_question_id(raw: &str) -> Result<QuestionId, Error> {
    QuestionId::new(raw).map_err(|_| Error::not_found("question not found"))
}

/// List the most recent questions.
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let questions = state
        .questions
        .recent_questions(RECENT_QUESTIONS_LIMIT)
        .await?;
    render(
        &QuestionsIndexPage::new(session.is_signed_in(), &questions),
        StatusCode::OK,
    )
}

/// Show a question and its answers.
#[get("/questions/{question_id}")]
pub async fn show(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let question_id = parse_question_id(&path)?;
    let page = state.questions.question_page(&question_id).await?;
    render(
        &QuestionShowPage::new(session.is_signed_in(), page),
        StatusCode::OK,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockQuestionsQuery, QuestionRepository};
    use crate::domain::test_fixtures::question_by;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::memory_state;
    use crate::outbound::memory::InMemoryStore;
    use actix_web::{App, test};
    use rstest::rstest;
    use std::sync::Arc;

    async fn get(state: HttpState, uri: &str) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .service(index)
                .service(show),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        (status, String::from_utf8(body.to_vec()).expect("utf-8 body"))
    }

    #[actix_web::test]
    async fn index_lists_stored_questions() {
        let store = Arc::new(InMemoryStore::new());
        let question = question_by(UserId::random());
        store.insert(&question).await.expect("seed question");

        let (status, html) = get(memory_state(&store), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(question.title.as_ref()));
    }

    #[actix_web::test]
    async fn show_renders_question_without_sign_in() {
        let store = Arc::new(InMemoryStore::new());
        let question = question_by(UserId::random());
        store.insert(&question).await.expect("seed question");

        let (status, html) = get(memory_state(&store), &format!("/questions/{}", question.id)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(question.body.as_ref()));
        assert!(html.contains("unknown user"));
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("6f1c1d3e-0000-4000-8000-000000000001")]
    #[actix_rt::test]
    async fn unknown_question_is_not_found(#[case] id: &str) {
        let state = memory_state(&Arc::new(InMemoryStore::new()));

        let (status, _) = get(state, &format!("/questions/{id}")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn index_surfaces_query_failures() {
        let mut questions = MockQuestionsQuery::new();
        questions
            .expect_recent_questions()
            .withf(|limit| *limit == RECENT_QUESTIONS_LIMIT)
            .return_once(|_| Err(Error::service_unavailable("database offline")));
        let mut state = memory_state(&Arc::new(InMemoryStore::new()));
        state.questions = Arc::new(questions);

        let (status, body) = get(state, "/").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("service_unavailable"));
    }
}
