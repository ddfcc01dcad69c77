//! Listing management service.
//!
//! Implements the owner-side [`ListingCommand`] and the [`ListingQuery`]
//! reads on top of a [`ListingRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CreateListingRequest, ListingCommand, ListingQuery, ListingRepository, ListingRepositoryError,
    OwnerListings, SetAvailabilityRequest,
};
use crate::domain::{Error, Listing, ListingId, UserId};

pub(super) fn map_listing_repository_error(error: ListingRepositoryError) -> Error {
    match error {
        ListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("listing store unavailable: {message}"))
        }
        ListingRepositoryError::Query { message } => {
            Error::internal(format!("listing store error: {message}"))
        }
        ListingRepositoryError::DuplicateKey { id } => {
            Error::conflict(format!("listing {id} already exists"))
        }
        ListingRepositoryError::NotFound { id } => {
            Error::not_found(format!("listing {id} not found"))
        }
    }
}

/// Listing service implementing the listing driving ports.
#[derive(Clone)]
pub struct ListingService<L> {
    listings: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L> ListingService<L> {
    /// Create a service over the listing store.
    pub fn new(listings: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self { listings, clock }
    }
}

impl<L> ListingService<L>
where
    L: ListingRepository,
{
    async fn owned_listing(&self, owner_id: &UserId, listing_id: &ListingId) -> Result<Listing, Error> {
        let listing = self
            .listings
            .find(listing_id)
            .await
            .map_err(map_listing_repository_error)?
            .ok_or_else(|| Error::not_found(format!("listing {listing_id} not found")))?;
        if !listing.is_owned_by(owner_id) {
            return Err(Error::forbidden("only the owner may change this listing"));
        }
        Ok(listing)
    }
}

#[async_trait]
impl<L> ListingCommand for ListingService<L>
where
    L: ListingRepository,
{
    async fn create_listing(&self, request: CreateListingRequest) -> Result<Listing, Error> {
        let listing = Listing::create(
            ListingId::generate(),
            request.owner_id,
            request.draft,
            self.clock.utc(),
        )
        .map_err(|err| Error::invalid_request(format!("invalid listing: {err}")))?;

        self.listings
            .insert(&listing)
            .await
            .map_err(map_listing_repository_error)?;

        info!(listing_id = %listing.id(), owner_id = %listing.owner_id(), "listing created");
        Ok(listing)
    }

    async fn set_availability(&self, request: SetAvailabilityRequest) -> Result<Listing, Error> {
        let listing = self
            .owned_listing(&request.owner_id, &request.listing_id)
            .await?;
        let available = request.available.unwrap_or(!listing.is_available());

        self.listings
            .set_availability(listing.id(), available)
            .await
            .map_err(map_listing_repository_error)
    }

    async fn delete_listing(&self, owner_id: &UserId, listing_id: &ListingId) -> Result<(), Error> {
        let listing = self.owned_listing(owner_id, listing_id).await?;
        let removed = self
            .listings
            .delete(listing.id())
            .await
            .map_err(map_listing_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!("listing {listing_id} not found")));
        }

        info!(listing_id = %listing_id, "listing deleted");
        Ok(())
    }
}

#[async_trait]
impl<L> ListingQuery for ListingService<L>
where
    L: ListingRepository,
{
    async fn get_listing(&self, listing_id: &ListingId) -> Result<Listing, Error> {
        self.listings
            .find(listing_id)
            .await
            .map_err(map_listing_repository_error)?
            .ok_or_else(|| Error::not_found(format!("listing {listing_id} not found")))
    }

    async fn my_listings(&self, owner_id: &UserId) -> Result<OwnerListings, Error> {
        let listings = self
            .listings
            .list_by_owner(owner_id)
            .await
            .map_err(map_listing_repository_error)?;
        Ok(OwnerListings::from_listings(listings))
    }
}

#[cfg(test)]
#[path = "listing_service_tests.rs"]
mod tests;
