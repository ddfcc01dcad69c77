//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(err: &Error) -> Value {
    let bytes = to_bytes(err.error_response().into_body())
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("not yours"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already requested"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] expected: StatusCode) {
    assert_eq!(err.status_code(), expected);
}

#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id() {
    let err = Error::internal("listing store error: disk full")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "path": "/var/lib/store" }));

    let response = err.error_response();
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );

    let body = body_of(&err).await;
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[actix_web::test]
async fn client_errors_pass_through_with_details() {
    let err = Error::conflict("you have already requested this listing")
        .with_details(json!({ "listingId": "l1" }));

    let body = body_of(&err).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "you have already requested this listing");
    assert_eq!(body["details"]["listingId"], "l1");
}
