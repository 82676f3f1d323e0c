//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("sign in"), StatusCode::FOUND)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[actix_rt::test]
async fn unauthorized_redirects_to_sign_in(expected_trace_id: String) {
    let error = Error::unauthorized("sign in required").with_trace_id(expected_trace_id);
    let response = ResponseError::error_response(&error);

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(SIGN_IN_PATH)
    );
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some(TRACE_ID)
    );
    let body = to_bytes(response.into_body()).await.expect("read body");
    assert!(body.is_empty());
}

#[rstest]
#[actix_rt::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id)
        .with_details(json!({ "secret": "x" }));
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = to_bytes(response.into_body()).await.expect("read body");
    let value: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(
        value,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_rt::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("answer body must not be empty")
        .with_trace_id(expected_trace_id)
        .with_details(json!({ "field": "body", "code": "empty" }));
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body()).await.expect("read body");
    let value: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(value["message"], "answer body must not be empty");
    assert_eq!(value["details"]["field"], "body");
    assert_eq!(value["traceId"], TRACE_ID);
}

#[rstest]
fn actix_errors_become_internal() {
    let actix = actix_web::error::ErrorBadGateway("upstream");
    let error = Error::from(actix);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Internal server error");
}
