//! Port for the listing document collection.

use async_trait::async_trait;

use crate::domain::{Listing, ListingId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing store adapters.
    pub enum ListingRepositoryError {
        /// Store could not be reached.
        Connection { message: String } => "listing store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } => "listing store query failed: {message}",
        /// A listing with the same key already exists.
        DuplicateKey { id: String } => "listing {id} already exists",
        /// The addressed listing does not exist.
        NotFound { id: String } => "listing {id} not found",
    }
}

/// Storage contract for listings.
///
/// Every call is a single document operation; adapters serialise writes to
/// one document but make no cross-call guarantees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Insert a new listing. Fails with `DuplicateKey` when the key is taken.
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError>;

    /// Fetch a listing by key.
    async fn find(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Listings whose availability flag is set, in store order.
    async fn list_available(&self) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Listings owned by `owner`, in store order.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Overwrite the availability flag and return the stored listing.
    async fn set_availability(
        &self,
        id: &ListingId,
        available: bool,
    ) -> Result<Listing, ListingRepositoryError>;

    /// Remove a listing. Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError>;
}
