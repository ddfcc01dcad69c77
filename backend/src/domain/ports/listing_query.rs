//! Driving port for listing reads.

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingId, UserId};

/// An owner's listings with availability counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerListings {
    /// Listings, newest first.
    pub listings: Vec<Listing>,
    /// Number of listings currently offered.
    pub available_count: usize,
    /// Number of listings currently withdrawn.
    pub unavailable_count: usize,
}

impl OwnerListings {
    /// Sort newest first and count availability.
    #[must_use]
    pub fn from_listings(mut listings: Vec<Listing>) -> Self {
        listings.sort_by_key(|listing| std::cmp::Reverse(listing.created_at()));
        let available_count = listings.iter().filter(|l| l.is_available()).count();
        let unavailable_count = listings.len() - available_count;
        Self {
            listings,
            available_count,
            unavailable_count,
        }
    }
}

/// Read access to individual listings and owner shelves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingQuery: Send + Sync {
    /// Fetch one listing.
    ///
    /// # Errors
    ///
    /// `not_found` when no listing has the key.
    async fn get_listing(&self, listing_id: &ListingId) -> Result<Listing, Error>;

    /// Listings owned by `owner_id`, newest first, with counts.
    async fn my_listings(&self, owner_id: &UserId) -> Result<OwnerListings, Error>;
}
