//! Visible feed composition.
//!
//! Everything here is pure: callers fetch listings and requests and hand
//! them in.

use std::collections::HashSet;

use super::{ExchangeRequest, Listing, ListingId, RequestStatus};

/// Listings a browsing user should see.
///
/// Keeps listings that are available and not referenced by any approved
/// request. Input order is preserved.
///
/// # Examples
/// ```
/// use bookswap::domain::{compute_visible_feed, Listing, ListingDraft, ListingId, UserId};
/// use chrono::Utc;
///
/// let draft = ListingDraft {
///     title: "Compilers".to_owned(),
///     subject: "CSE".to_owned(),
///     ..ListingDraft::default()
/// };
/// let owner = UserId::new("owner").expect("owner");
/// let listing = Listing::create(ListingId::generate(), owner, draft, Utc::now())
///     .expect("listing");
///
/// let feed = compute_visible_feed(&[listing.clone()], &[]);
/// assert_eq!(feed, vec![listing]);
/// ```
#[must_use]
pub fn compute_visible_feed(listings: &[Listing], requests: &[ExchangeRequest]) -> Vec<Listing> {
    let approved: HashSet<&ListingId> = requests
        .iter()
        .filter(|request| request.status() == RequestStatus::Approved)
        .map(ExchangeRequest::listing_id)
        .collect();

    listings
        .iter()
        .filter(|listing| listing.is_available() && !approved.contains(listing.id()))
        .cloned()
        .collect()
}

/// Optional narrowing applied on top of the visible feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Exact subject tag.
    pub subject: Option<String>,
    /// Exact regulation tag.
    pub regulation: Option<String>,
}

impl FeedFilter {
    /// Build a filter, treating blank values as absent.
    #[must_use]
    pub fn new(
        title: Option<String>,
        subject: Option<String>,
        regulation: Option<String>,
    ) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed| !trimmed.is_empty())
        };
        Self {
            title: clean(title).map(|title| title.to_lowercase()),
            subject: clean(subject),
            regulation: clean(regulation),
        }
    }

    /// True when `listing` passes every populated criterion.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        let title_ok = self
            .title
            .as_deref()
            .is_none_or(|needle| listing.title().to_lowercase().contains(needle));
        let subject_ok = self
            .subject
            .as_deref()
            .is_none_or(|subject| listing.subject() == subject);
        let regulation_ok = self
            .regulation
            .as_deref()
            .is_none_or(|regulation| listing.regulation() == Some(regulation));
        title_ok && subject_ok && regulation_ok
    }
}

/// Distinct subjects in first-seen order.
#[must_use]
pub fn feed_subjects(listings: &[Listing]) -> Vec<String> {
    let mut seen = HashSet::new();
    listings
        .iter()
        .map(Listing::subject)
        .filter(|subject| seen.insert(*subject))
        .map(str::to_owned)
        .collect()
}
