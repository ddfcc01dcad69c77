//! Shared builders for domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::{Clock, MockClock};

use super::{ExchangeRequest, Listing, ListingDraft, ListingId, UserId};

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 3, 9, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock pinned to [`fixed_now`].
pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(fixed_now());
    clock
        .expect_local()
        .return_const(fixed_now().with_timezone(&Local));
    Arc::new(clock)
}

pub(crate) fn user(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user id")
}

pub(crate) fn listing_id(raw: &str) -> ListingId {
    ListingId::new(raw).expect("fixture listing id")
}

/// Available listing `id` owned by `owner`, created `age_minutes` before
/// [`fixed_now`].
pub(crate) fn listing(id: &str, owner: &str, age_minutes: i64) -> Listing {
    let draft = ListingDraft {
        title: format!("Book {id}"),
        subject: "CSE".to_owned(),
        image_urls: vec![format!("https://img.test/{id}.png")],
        ..ListingDraft::default()
    };
    Listing::create(
        listing_id(id),
        user(owner),
        draft,
        fixed_now() - chrono::Duration::minutes(age_minutes),
    )
    .expect("fixture listing")
}

/// Pending request by `requester` for `listing`, created `age_minutes`
/// before [`fixed_now`].
pub(crate) fn pending_request(listing: &Listing, requester: &str, age_minutes: i64) -> ExchangeRequest {
    ExchangeRequest::pending(
        listing.id().clone(),
        user(requester),
        listing.owner_id().clone(),
        "please",
        fixed_now() - chrono::Duration::minutes(age_minutes),
    )
}
