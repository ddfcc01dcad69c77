//! Driving port for the request inbox.

use async_trait::async_trait;

use crate::domain::{Error, ExchangeRequest, ListingSummary, UserId};

/// A request paired with the listing it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxEntry {
    /// The request.
    pub request: ExchangeRequest,
    /// Listing summary; `None` when the listing is gone or could not be read.
    pub listing: Option<ListingSummary>,
}

/// Received and sent request lists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRequestQuery: Send + Sync {
    /// Requests addressed to `owner_id`, newest first.
    async fn received(&self, owner_id: &UserId) -> Result<Vec<InboxEntry>, Error>;

    /// Requests made by `requester_id`, newest first.
    async fn sent(&self, requester_id: &UserId) -> Result<Vec<InboxEntry>, Error>;

    /// Number of pending requests addressed to `owner_id`.
    async fn pending_received_count(&self, owner_id: &UserId) -> Result<usize, Error>;
}
