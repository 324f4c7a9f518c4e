//! Tests for domain error construction and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::invalid_reference("bad id"), ErrorCode::InvalidReference)]
#[case(Error::unauthenticated("login"), ErrorCode::Unauthenticated)]
#[case(Error::unauthorized("nope"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("busy"), ErrorCode::Conflict)]
#[case(Error::upstream_failure("down"), ErrorCode::UpstreamFailure)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::not_found("missing").try_with_trace_id("  ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn serialises_camel_case_payload() {
    let error = Error::invalid_reference("unknown content")
        .with_trace_id("abc")
        .with_details(json!({ "field": "contentId" }));

    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_reference",
            "message": "unknown content",
            "traceId": "abc",
            "details": { "field": "contentId" },
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::conflict("busy")).expect("serialise error");
    assert_eq!(value, json!({ "code": "conflict", "message": "busy" }));
}

#[rstest]
fn deserialisation_rejects_blank_message() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "not_found", "message": " " }));
    assert!(result.is_err());
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
        .parse()
        .expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::upstream_failure("down") }).await;
    assert_eq!(error.trace_id(), Some("00000000-0000-0000-0000-000000000001"));
}
