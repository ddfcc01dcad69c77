//! Driving port for owner-side listing management.

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingDraft, ListingId, UserId};

/// Request to publish a new listing.
#[derive(Debug, Clone)]
pub struct CreateListingRequest {
    /// User publishing the listing.
    pub owner_id: UserId,
    /// Submitted fields.
    pub draft: ListingDraft,
}

/// Request to change a listing's availability flag.
#[derive(Debug, Clone)]
pub struct SetAvailabilityRequest {
    /// User performing the change; must own the listing.
    pub owner_id: UserId,
    /// Listing to update.
    pub listing_id: ListingId,
    /// New flag value. `None` flips the current value.
    pub available: Option<bool>,
}

/// Mutations a listing owner may perform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingCommand: Send + Sync {
    /// Validate and store a new, available listing.
    ///
    /// # Errors
    ///
    /// `invalid_request` when the draft fails validation; store failures map
    /// to `service_unavailable` or `internal_error`.
    async fn create_listing(&self, request: CreateListingRequest) -> Result<Listing, Error>;

    /// Set or toggle availability.
    ///
    /// # Errors
    ///
    /// `not_found` for unknown listings, `forbidden` for non-owners.
    async fn set_availability(&self, request: SetAvailabilityRequest) -> Result<Listing, Error>;

    /// Permanently remove a listing.
    ///
    /// # Errors
    ///
    /// `not_found` for unknown listings, `forbidden` for non-owners.
    async fn delete_listing(&self, owner_id: &UserId, listing_id: &ListingId) -> Result<(), Error>;
}
