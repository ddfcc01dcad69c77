//! In-process document store.
//!
//! [`MemoryDocumentStore`] holds both collections behind one mutex and
//! implements [`ListingRepository`] and [`ExchangeRequestRepository`]. Every
//! port call is a single critical section, which serialises writes to a
//! document and makes [`ExchangeRequestRepository::commit_approval`] atomic
//! across the request, its siblings and the listing.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::ports::{
    ApprovalCommit, ApprovalOutcome, ExchangeRequestRepository, ExchangeRequestRepositoryError,
    ListingRepository, ListingRepositoryError,
};
use crate::domain::{ExchangeRequest, Listing, ListingId, RequestId, RequestStatus, UserId};

#[derive(Debug, Default)]
struct Collections {
    listings: Vec<Listing>,
    requests: Vec<ExchangeRequest>,
}

/// Document store kept in process memory. Collections keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<Collections>,
}

const POISONED: &str = "document store lock poisoned";

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn listings_guard(&self) -> Result<MutexGuard<'_, Collections>, ListingRepositoryError> {
        self.collections
            .lock()
            .map_err(|_| ListingRepositoryError::query(POISONED))
    }

    fn requests_guard(&self) -> Result<MutexGuard<'_, Collections>, ExchangeRequestRepositoryError> {
        self.collections
            .lock()
            .map_err(|_| ExchangeRequestRepositoryError::query(POISONED))
    }
}

fn request_mut<'a>(
    requests: &'a mut [ExchangeRequest],
    id: &RequestId,
) -> Result<&'a mut ExchangeRequest, ExchangeRequestRepositoryError> {
    requests
        .iter_mut()
        .find(|request| request.id() == id)
        .ok_or_else(|| ExchangeRequestRepositoryError::not_found(id.to_string()))
}

fn ensure_pending(request: &ExchangeRequest) -> Result<(), ExchangeRequestRepositoryError> {
    match request.status() {
        RequestStatus::Pending => Ok(()),
        actual => Err(ExchangeRequestRepositoryError::stale_status(
            request.id().to_string(),
            actual,
        )),
    }
}

#[async_trait]
impl ListingRepository for MemoryDocumentStore {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut guard = self.listings_guard()?;
        if guard.listings.iter().any(|stored| stored.id() == listing.id()) {
            return Err(ListingRepositoryError::duplicate_key(listing.id().to_string()));
        }
        guard.listings.push(listing.clone());
        debug!(listing_id = %listing.id(), "listing stored");
        Ok(())
    }

    async fn find(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        let guard = self.listings_guard()?;
        Ok(guard.listings.iter().find(|listing| listing.id() == id).cloned())
    }

    async fn list_available(&self) -> Result<Vec<Listing>, ListingRepositoryError> {
        let guard = self.listings_guard()?;
        Ok(guard
            .listings
            .iter()
            .filter(|listing| listing.is_available())
            .cloned()
            .collect())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Listing>, ListingRepositoryError> {
        let guard = self.listings_guard()?;
        Ok(guard
            .listings
            .iter()
            .filter(|listing| listing.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn set_availability(
        &self,
        id: &ListingId,
        available: bool,
    ) -> Result<Listing, ListingRepositoryError> {
        let mut guard = self.listings_guard()?;
        let listing = guard
            .listings
            .iter_mut()
            .find(|listing| listing.id() == id)
            .ok_or_else(|| ListingRepositoryError::not_found(id.to_string()))?;
        listing.set_available(available);
        debug!(listing_id = %id, available, "listing availability written");
        Ok(listing.clone())
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError> {
        let mut guard = self.listings_guard()?;
        let before = guard.listings.len();
        guard.listings.retain(|listing| listing.id() != id);
        Ok(guard.listings.len() != before)
    }
}

#[async_trait]
impl ExchangeRequestRepository for MemoryDocumentStore {
    async fn insert(&self, request: &ExchangeRequest) -> Result<(), ExchangeRequestRepositoryError> {
        let mut guard = self.requests_guard()?;
        if guard.requests.iter().any(|stored| stored.id() == request.id()) {
            return Err(ExchangeRequestRepositoryError::duplicate_key(
                request.id().to_string(),
            ));
        }
        guard.requests.push(request.clone());
        debug!(request_id = %request.id(), "request stored");
        Ok(())
    }

    async fn find(
        &self,
        id: &RequestId,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let guard = self.requests_guard()?;
        Ok(guard.requests.iter().find(|request| request.id() == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        Ok(self.requests_guard()?.requests.clone())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let guard = self.requests_guard()?;
        Ok(guard
            .requests
            .iter()
            .filter(|request| request.owner_id() == owner)
            .cloned()
            .collect())
    }

    async fn list_by_requester(
        &self,
        requester: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let guard = self.requests_guard()?;
        Ok(guard
            .requests
            .iter()
            .filter(|request| request.requester_id() == requester)
            .cloned()
            .collect())
    }

    async fn set_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        at: DateTime<Utc>,
    ) -> Result<ExchangeRequest, ExchangeRequestRepositoryError> {
        let mut guard = self.requests_guard()?;
        let request = request_mut(&mut guard.requests, id)?;
        request.overwrite_status(status, at);
        debug!(request_id = %id, %status, "request status overwritten");
        Ok(request.clone())
    }

    async fn resolve_pending(
        &self,
        id: &RequestId,
        status: RequestStatus,
        at: DateTime<Utc>,
    ) -> Result<ExchangeRequest, ExchangeRequestRepositoryError> {
        let mut guard = self.requests_guard()?;
        let request = request_mut(&mut guard.requests, id)?;
        ensure_pending(request)?;
        request.overwrite_status(status, at);
        debug!(request_id = %id, %status, "pending request resolved");
        Ok(request.clone())
    }

    async fn commit_approval(
        &self,
        commit: ApprovalCommit,
    ) -> Result<ApprovalOutcome, ExchangeRequestRepositoryError> {
        let mut guard = self.requests_guard()?;
        let Collections { listings, requests } = &mut *guard;

        let approved = request_mut(requests, &commit.request_id)?;
        ensure_pending(approved)?;
        approved.overwrite_status(RequestStatus::Approved, commit.decided_at);
        let stored = approved.clone();
        let listing_id = stored.listing_id();

        let mut listing_closed = false;
        if commit.close_listing {
            if let Some(listing) = listings.iter_mut().find(|listing| listing.id() == listing_id) {
                listing.set_available(false);
                listing_closed = true;
            }
        }

        let mut rejected_competitors = Vec::new();
        if commit.reject_competing {
            for sibling in requests.iter_mut().filter(|request| {
                request.listing_id() == listing_id && request.status() == RequestStatus::Pending
            }) {
                sibling.overwrite_status(RequestStatus::Rejected, commit.decided_at);
                rejected_competitors.push(sibling.id().clone());
            }
        }

        debug!(
            request_id = %commit.request_id,
            listing_closed,
            rejected = rejected_competitors.len(),
            "approval committed"
        );
        Ok(ApprovalOutcome {
            request: stored,
            listing_closed,
            rejected_competitors,
        })
    }
}
