//! Tests for the exchange request state machine.

use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn user(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user")
}

#[fixture]
fn request() -> ExchangeRequest {
    ExchangeRequest::pending(
        ListingId::new("listing-1").expect("fixture listing"),
        user("requester"),
        user("owner"),
        "  can I pick it up on Friday?  ",
        t0(),
    )
}

#[rstest]
fn new_requests_are_pending_with_equal_timestamps(request: ExchangeRequest) {
    assert_eq!(request.status(), RequestStatus::Pending);
    assert_eq!(request.created_at(), request.updated_at());
    assert_eq!(request.message(), "can I pick it up on Friday?");
}

#[rstest]
fn empty_message_stays_empty_string() {
    let request = ExchangeRequest::pending(
        ListingId::new("l").expect("listing"),
        user("a"),
        user("b"),
        "",
        t0(),
    );
    let json = serde_json::to_value(&request).expect("serialise");
    assert_eq!(json["message"], "");

    let back: ExchangeRequest = serde_json::from_value(json).expect("deserialise");
    assert_eq!(back.message(), "");
}

#[rstest]
fn id_is_derived_from_listing_and_requester(request: ExchangeRequest) {
    assert_eq!(
        request.id(),
        &RequestId::for_pair(request.listing_id(), request.requester_id())
    );
    let other = RequestId::for_pair(request.listing_id(), &user("someone-else"));
    assert_ne!(request.id(), &other);
}

#[rstest]
#[case(RequestStatus::Pending, Decision::Approve, Ok(RequestStatus::Approved))]
#[case(RequestStatus::Pending, Decision::Reject, Ok(RequestStatus::Rejected))]
#[case(
    RequestStatus::Approved,
    Decision::Reject,
    Err(TransitionError { current: RequestStatus::Approved, decision: Decision::Reject })
)]
#[case(
    RequestStatus::Rejected,
    Decision::Approve,
    Err(TransitionError { current: RequestStatus::Rejected, decision: Decision::Approve })
)]
#[case(
    RequestStatus::Completed,
    Decision::Approve,
    Err(TransitionError { current: RequestStatus::Completed, decision: Decision::Approve })
)]
fn transition_table(
    #[case] from: RequestStatus,
    #[case] decision: Decision,
    #[case] expected: Result<RequestStatus, TransitionError>,
) {
    assert_eq!(from.transition(decision), expected);
}

#[rstest]
fn owner_approval_updates_status_and_timestamp(request: ExchangeRequest) {
    let later = t0() + Duration::minutes(5);
    let approved = request
        .decide(&user("owner"), Decision::Approve, later)
        .expect("owner may approve");
    assert_eq!(approved.status(), RequestStatus::Approved);
    assert_eq!(approved.updated_at(), later);
    assert_eq!(approved.created_at(), t0());
    assert_eq!(request.status(), RequestStatus::Pending);
}

#[rstest]
fn non_owner_cannot_decide(request: ExchangeRequest) {
    let result = request.decide(&user("requester"), Decision::Approve, t0());
    assert_eq!(
        result,
        Err(DecisionError::NotOwner {
            actor: user("requester")
        })
    );
}

#[rstest]
fn terminal_requests_refuse_further_decisions(request: ExchangeRequest) {
    let rejected = request
        .decide(&user("owner"), Decision::Reject, t0())
        .expect("reject pending");
    let error = rejected
        .decide(&user("owner"), Decision::Approve, t0())
        .expect_err("rejected is terminal");
    assert_eq!(error.to_string(), "cannot approve a request that is rejected");
}

#[rstest]
fn raw_overwrite_is_last_write_wins(mut request: ExchangeRequest) {
    request.overwrite_status(RequestStatus::Approved, t0() + Duration::seconds(1));
    request.overwrite_status(RequestStatus::Rejected, t0() + Duration::seconds(2));
    assert_eq!(request.status(), RequestStatus::Rejected);
    assert_eq!(request.updated_at(), t0() + Duration::seconds(2));
}

#[rstest]
fn status_uses_lowercase_wire_names() {
    let json = serde_json::to_string(&RequestStatus::Completed).expect("serialise");
    assert_eq!(json, "\"completed\"");
}
