//! Received and sent request lists.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::exchange_service::map_request_repository_error;
use crate::domain::ports::{
    ExchangeRequestQuery, ExchangeRequestRepository, InboxEntry, ListingRepository,
};
use crate::domain::{Error, ExchangeRequest, RequestStatus, UserId};

/// Inbox service implementing [`ExchangeRequestQuery`].
///
/// Each entry is composed with a summary of the referenced listing. A
/// listing that is gone, or that cannot be read, leaves the summary empty
/// instead of failing the whole list.
#[derive(Clone)]
pub struct InboxService<L, R> {
    listings: Arc<L>,
    requests: Arc<R>,
}

impl<L, R> InboxService<L, R> {
    /// Create an inbox service over both stores.
    pub fn new(listings: Arc<L>, requests: Arc<R>) -> Self {
        Self { listings, requests }
    }
}

impl<L, R> InboxService<L, R>
where
    L: ListingRepository,
    R: ExchangeRequestRepository,
{
    async fn compose(&self, mut requests: Vec<ExchangeRequest>) -> Vec<InboxEntry> {
        requests.sort_by_key(|request| Reverse(request.created_at()));

        let mut entries = Vec::with_capacity(requests.len());
        for request in requests {
            let listing = match self.listings.find(request.listing_id()).await {
                Ok(found) => found.map(|listing| listing.summary()),
                Err(err) => {
                    warn!(
                        listing_id = %request.listing_id(),
                        error = %err,
                        "listing lookup failed; omitting summary"
                    );
                    None
                }
            };
            entries.push(InboxEntry { request, listing });
        }
        entries
    }
}

#[async_trait]
impl<L, R> ExchangeRequestQuery for InboxService<L, R>
where
    L: ListingRepository,
    R: ExchangeRequestRepository,
{
    async fn received(&self, owner_id: &UserId) -> Result<Vec<InboxEntry>, Error> {
        let requests = self
            .requests
            .list_by_owner(owner_id)
            .await
            .map_err(map_request_repository_error)?;
        Ok(self.compose(requests).await)
    }

    async fn sent(&self, requester_id: &UserId) -> Result<Vec<InboxEntry>, Error> {
        let requests = self
            .requests
            .list_by_requester(requester_id)
            .await
            .map_err(map_request_repository_error)?;
        Ok(self.compose(requests).await)
    }

    async fn pending_received_count(&self, owner_id: &UserId) -> Result<usize, Error> {
        let requests = self
            .requests
            .list_by_owner(owner_id)
            .await
            .map_err(map_request_repository_error)?;
        Ok(requests
            .iter()
            .filter(|request| request.status() == RequestStatus::Pending)
            .count())
    }
}
