//! Tests for listing construction and validation.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;

#[fixture]
fn owner() -> UserId {
    UserId::new("owner-1").expect("fixture owner")
}

#[fixture]
fn draft() -> ListingDraft {
    ListingDraft {
        title: "Engineering Mathematics II".to_owned(),
        subject: "CSE".to_owned(),
        ..ListingDraft::default()
    }
}

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn build(owner: UserId, draft: ListingDraft) -> Result<Listing, ListingValidationError> {
    Listing::create(ListingId::generate(), owner, draft, created_at())
}

#[rstest]
fn new_listing_is_available_and_owned(owner: UserId, draft: ListingDraft) {
    let listing = build(owner.clone(), draft).expect("valid draft");
    assert!(listing.is_available());
    assert!(listing.is_owned_by(&owner));
    assert_eq!(listing.condition(), Condition::Good);
    assert_eq!(listing.created_at(), created_at());
}

#[rstest]
#[case("", "CSE", ListingValidationError::EmptyTitle)]
#[case("   ", "CSE", ListingValidationError::EmptyTitle)]
#[case("Title", "", ListingValidationError::EmptySubject)]
#[case("Title", " \t", ListingValidationError::EmptySubject)]
fn rejects_blank_required_fields(
    owner: UserId,
    #[case] title: &str,
    #[case] subject: &str,
    #[case] expected: ListingValidationError,
) {
    let draft = ListingDraft {
        title: title.to_owned(),
        subject: subject.to_owned(),
        ..ListingDraft::default()
    };
    assert_eq!(build(owner, draft), Err(expected));
}

#[rstest]
fn rejects_overlong_titles(owner: UserId, mut draft: ListingDraft) {
    draft.title = "a".repeat(TITLE_MAX + 1);
    assert_eq!(
        build(owner, draft),
        Err(ListingValidationError::TitleTooLong { max: TITLE_MAX })
    );
}

#[rstest]
fn trims_free_text_and_drops_blank_optionals(owner: UserId, mut draft: ListingDraft) {
    draft.title = "  Data Structures ".to_owned();
    draft.description = "  barely used  ".to_owned();
    draft.author = Some("  ".to_owned());
    draft.regulation = Some(" R20 ".to_owned());
    draft.image_urls = vec![" ".to_owned(), "https://img.test/a.png".to_owned()];

    let listing = build(owner, draft).expect("valid draft");
    assert_eq!(listing.title(), "Data Structures");
    assert_eq!(listing.description(), "barely used");
    assert_eq!(listing.author(), None);
    assert_eq!(listing.regulation(), Some("R20"));
    assert_eq!(listing.image_urls(), ["https://img.test/a.png".to_owned()]);
}

#[rstest]
#[case(None, None)]
#[case(Some(0), None)]
#[case(Some(25_000), Some(25_000))]
fn zero_price_means_free(
    owner: UserId,
    mut draft: ListingDraft,
    #[case] submitted: Option<u64>,
    #[case] stored: Option<u64>,
) {
    draft.price_minor_units = submitted;
    let listing = build(owner, draft).expect("valid draft");
    assert_eq!(listing.price().map(Price::minor_units), stored);
}

#[rstest]
#[case("Excellent", Condition::Excellent)]
#[case("good", Condition::Good)]
#[case(" FAIR ", Condition::Fair)]
#[case("poor", Condition::Poor)]
fn parses_conditions_case_insensitively(#[case] raw: &str, #[case] expected: Condition) {
    assert_eq!(raw.parse::<Condition>(), Ok(expected));
}

#[rstest]
fn rejects_unknown_condition() {
    assert!(matches!(
        "mint".parse::<Condition>(),
        Err(ListingValidationError::UnknownCondition { .. })
    ));
}

#[rstest]
fn availability_toggle_keeps_owner(owner: UserId, draft: ListingDraft) {
    let mut listing = build(owner.clone(), draft).expect("valid draft");
    listing.set_available(false);
    assert!(!listing.is_available());
    assert_eq!(listing.owner_id(), &owner);
}

#[rstest]
fn summary_uses_first_image(owner: UserId, mut draft: ListingDraft) {
    draft.author = Some("B. S. Grewal".to_owned());
    draft.image_urls = vec!["first.png".to_owned(), "second.png".to_owned()];
    let listing = build(owner, draft).expect("valid draft");

    let summary = listing.summary();
    assert_eq!(&summary.id, listing.id());
    assert_eq!(summary.author.as_deref(), Some("B. S. Grewal"));
    assert_eq!(summary.image_url.as_deref(), Some("first.png"));
}

#[rstest]
fn document_round_trips_through_json(owner: UserId, draft: ListingDraft) {
    let listing = build(owner, draft).expect("valid draft");
    let json = serde_json::to_value(&listing).expect("serialise");
    assert_eq!(json["available"], true);
    assert_eq!(json["ownerId"], "owner-1");
    let back: Listing = serde_json::from_value(json).expect("deserialise");
    assert_eq!(back, listing);
}
