//! Tests for domain error construction and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("sign in"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let error = Error::invalid_request("answer body must not be empty")
        .with_trace_id("abc")
        .with_details(json!({ "field": "body" }));
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "answer body must not be empty",
            "traceId": "abc",
            "details": { "field": "body" }
        })
    );

    let bare = serde_json::to_value(Error::not_found("missing")).expect("serialise error");
    assert!(bare.get("traceId").is_none());
    assert!(bare.get("details").is_none());
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::forbidden("denied").to_string(), "denied");
}
