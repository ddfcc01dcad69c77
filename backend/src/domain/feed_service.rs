//! Browse feed service.

use std::sync::Arc;

use async_trait::async_trait;

use super::exchange_service::map_request_repository_error;
use super::listing_service::map_listing_repository_error;
use crate::domain::ports::{ExchangeRequestRepository, FeedQuery, ListingRepository};
use crate::domain::{Error, FeedFilter, Listing, UserId, compute_visible_feed, feed_subjects};

/// Feed service implementing [`FeedQuery`].
#[derive(Clone)]
pub struct FeedService<L, R> {
    listings: Arc<L>,
    requests: Arc<R>,
}

impl<L, R> FeedService<L, R> {
    /// Create a feed service over both stores.
    pub fn new(listings: Arc<L>, requests: Arc<R>) -> Self {
        Self { listings, requests }
    }
}

impl<L, R> FeedService<L, R>
where
    L: ListingRepository,
    R: ExchangeRequestRepository,
{
    async fn visible(&self) -> Result<Vec<Listing>, Error> {
        let listings = self
            .listings
            .list_available()
            .await
            .map_err(map_listing_repository_error)?;
        let requests = self
            .requests
            .list_all()
            .await
            .map_err(map_request_repository_error)?;
        Ok(compute_visible_feed(&listings, &requests))
    }
}

#[async_trait]
impl<L, R> FeedQuery for FeedService<L, R>
where
    L: ListingRepository,
    R: ExchangeRequestRepository,
{
    async fn visible_feed(
        &self,
        viewer: Option<UserId>,
        filter: FeedFilter,
    ) -> Result<Vec<Listing>, Error> {
        let mut feed = self.visible().await?;
        feed.retain(|listing| {
            viewer.as_ref().is_none_or(|viewer| !listing.is_owned_by(viewer))
                && filter.matches(listing)
        });
        Ok(feed)
    }

    async fn feed_subjects(&self) -> Result<Vec<String>, Error> {
        Ok(feed_subjects(&self.visible().await?))
    }
}
