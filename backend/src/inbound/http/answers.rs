//! Answers controller.
//!
//! ```text
//! GET  /questions/{question_id}/answers/new  answer form
//! POST /questions/{question_id}/answers      answer[body]=...
//! POST /answers/{id}/upvote
//! POST /answers/{id}/downvote
//! ```
//!
//! Every action requires a signed-in user whose account still exists. The
//! session is checked before any path or form parsing so an anonymous caller
//! is always redirected to the sign-in page and nothing is read or written on
//! their behalf. A session naming a deleted account is purged the same way.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CastVoteRequest, CreateAnswerRequest};
use crate::domain::{
    AnswerBody, AnswerId, Error, QuestionId, VoteDirection, VoteOutcome, question_path,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pages::{AnswerFormPage, render};
use crate::inbound::http::questions::parse_question_id;
use crate::inbound::http::redirect_to;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Header set by browser scripts issuing background requests.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
const XHR_MARKER: &str = "XMLHttpRequest";

/// Form body for `POST /questions/{question_id}/answers`.
#[derive(Debug, Default, Deserialize)]
pub struct AnswerForm {
    #[serde(rename = "answer[body]", default)]
    pub body: String,
}

/// JSON returned to XHR vote requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub answer_id: AnswerId,
    pub question_id: QuestionId,
    pub votes: i64,
}

impl From<VoteOutcome> for VoteResponse {
    fn from(value: VoteOutcome) -> Self {
        Self {
            answer_id: value.answer_id,
            question_id: value.question_id,
            votes: value.tally.value(),
        }
    }
}

fn is_xhr(req: &HttpRequest) -> bool {
    req.headers()
        .get(REQUESTED_WITH_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case(XHR_MARKER))
}

fn parse_answer_id(raw: &str) -> Result<AnswerId, Error> {
    AnswerId::new(raw).map_err(|_| Error::not_found("answer not found"))
}

/// Render the answer form for a question.
#[get("/questions/{question_id}/answers/new")]
pub async fn new_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user(state.login.as_ref()).await?;
    let question_id = parse_question_id(&path)?;
    let question = state.answers_query.answer_form(&question_id).await?;
    render(&AnswerFormPage::new(&question), StatusCode::OK)
}

/// Post an answer and return to the question page.
///
/// A missing or undecodable form counts as an empty body.
#[post("/questions/{question_id}/answers")]
pub async fn create_answer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: Option<web::Form<AnswerForm>>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user(state.login.as_ref()).await?;
    let question_id = parse_question_id(&path)?;
    let form = form.map(web::Form::into_inner).unwrap_or_default();
    let body = AnswerBody::new(&form.body)?;

    let answer = state
        .answers
        .create_answer(CreateAnswerRequest {
            question_id,
            author_id,
            body,
        })
        .await?;
    Ok(redirect_to(&question_path(&answer.question_id)))
}

/// Vote an answer up.
#[post("/answers/{id}/upvote")]
pub async fn upvote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    vote(&state, &session, &path, &req, VoteDirection::Up).await
}

/// Vote an answer down.
#[post("/answers/{id}/downvote")]
pub async fn downvote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    vote(&state, &session, &path, &req, VoteDirection::Down).await
}

async fn vote(
    state: &HttpState,
    session: &SessionContext,
    raw_id: &str,
    req: &HttpRequest,
    direction: VoteDirection,
) -> ApiResult<HttpResponse> {
    let voter_id = session.require_user(state.login.as_ref()).await?;
    let answer_id = parse_answer_id(raw_id)?;

    let outcome = state
        .answers
        .cast_vote(CastVoteRequest {
            answer_id,
            voter_id,
            direction,
        })
        .await?;
    if is_xhr(req) {
        Ok(HttpResponse::Ok().json(VoteResponse::from(outcome)))
    } else {
        Ok(redirect_to(&question_path(&outcome.question_id)))
    }
}
