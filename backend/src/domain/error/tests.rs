//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn shorthands_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let value = serde_json::to_value(Error::not_found("listing missing")).expect("serialise");
    assert_eq!(
        value,
        json!({ "code": "not_found", "message": "listing missing" })
    );
}

#[rstest]
fn details_and_trace_id_survive_serialisation() {
    let error = Error::conflict("stale")
        .with_trace_id("abc")
        .with_details(json!({ "status": "approved" }));
    let value = serde_json::to_value(&error).expect("serialise");
    assert_eq!(value["traceId"], "abc");
    assert_eq!(value["details"]["status"], "approved");

    let back: Error = serde_json::from_value(value).expect("deserialise");
    assert_eq!(back, error);
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id = TraceId::generate();
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
}

#[rstest]
fn no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}
