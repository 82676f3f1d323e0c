//! Sign-in and sign-out handlers.
//!
//! ```text
//! GET    /users/sign_in   sign-in form
//! POST   /users/sign_in   user[email]=...&user[password]=...
//! DELETE /users/sign_out  (POST accepted for plain HTML forms)
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::ports::{INVALID_CREDENTIALS_MESSAGE, UNCONFIRMED_MESSAGE};
use crate::domain::{ErrorCode, SignInCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pages::{SignInPage, render};
use crate::inbound::http::redirect_to;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Where a successful sign-in or sign-out lands.
const HOME_PATH: &str = "/";

/// Form body for `POST /users/sign_in`.
#[derive(Debug, Default, Deserialize)]
pub struct SignInForm {
    #[serde(rename = "user[email]", default)]
    pub email: String,
    #[serde(rename = "user[password]", default)]
    pub password: String,
}

/// Render the sign-in form.
#[get("/users/sign_in")]
pub async fn sign_in_form(session: SessionContext) -> ApiResult<HttpResponse> {
    render(
        &SignInPage {
            signed_in: session.is_signed_in(),
            email: "",
            error: "",
        },
        StatusCode::OK,
    )
}

/// Authenticate and start a session.
///
/// Failures re-render the form with `401 Unauthorized` and keep the email.
#[post("/users/sign_in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: Option<web::Form<SignInForm>>,
) -> ApiResult<HttpResponse> {
    let form = form.map(web::Form::into_inner).unwrap_or_default();
    let credentials = match SignInCredentials::try_from_parts(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            debug!(%err, "rejected sign-in form");
            return rejected(&form.email, INVALID_CREDENTIALS_MESSAGE);
        }
    };

    match state.login.authenticate(&credentials).await {
        Ok(user_id) => {
            session.persist_user(&user_id)?;
            info!(%user_id, "user signed in");
            Ok(redirect_to(HOME_PATH))
        }
        Err(err) => match err.code() {
            ErrorCode::Unauthorized => rejected(&form.email, INVALID_CREDENTIALS_MESSAGE),
            ErrorCode::Forbidden => rejected(&form.email, UNCONFIRMED_MESSAGE),
            _ => Err(err),
        },
    }
}

fn rejected(email: &str, message: &str) -> ApiResult<HttpResponse> {
    render(
        &SignInPage {
            signed_in: false,
            email: email.trim(),
            error: message,
        },
        StatusCode::UNAUTHORIZED,
    )
}

/// End the session.
#[delete("/users/sign_out")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    end_session(&session)
}

/// End the session from a plain HTML form.
#[post("/users/sign_out")]
pub async fn sign_out_form(session: SessionContext) -> HttpResponse {
    end_session(&session)
}

fn end_session(session: &SessionContext) -> HttpResponse {
    session.sign_out();
    redirect_to(HOME_PATH)
}
