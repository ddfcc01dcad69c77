//! Port for the exchange request document collection.
//!
//! Besides single-document operations the port exposes
//! [`ExchangeRequestRepository::commit_approval`], the one write that spans
//! several documents. Adapters must apply it atomically: either the request
//! is approved together with every requested side effect, or nothing changes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ExchangeRequest, RequestId, RequestStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exchange request store adapters.
    pub enum ExchangeRequestRepositoryError {
        /// Store could not be reached.
        Connection { message: String } => "request store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } => "request store query failed: {message}",
        /// A request for the same listing and requester already exists.
        DuplicateKey { id: String } => "request {id} already exists",
        /// The addressed request does not exist.
        NotFound { id: String } => "request {id} not found",
        /// A conditional write found a different status than expected.
        StaleStatus { id: String, actual: RequestStatus } =>
            "request {id} is {actual}, not pending",
    }
}

/// Side effects applied together with an approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalCommit {
    /// Request being approved.
    pub request_id: RequestId,
    /// Timestamp written to every touched request.
    pub decided_at: DateTime<Utc>,
    /// Clear the listing's availability flag.
    pub close_listing: bool,
    /// Reject the other pending requests for the same listing.
    pub reject_competing: bool,
}

/// Result of a committed approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalOutcome {
    /// The approved request as stored.
    pub request: ExchangeRequest,
    /// Whether the listing flag was cleared.
    pub listing_closed: bool,
    /// Competing requests that were moved to `rejected`.
    pub rejected_competitors: Vec<RequestId>,
}

/// Storage contract for exchange requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRequestRepository: Send + Sync {
    /// Insert a request. The key is derived from the listing and the
    /// requester, so a second request for the same pair fails with
    /// `DuplicateKey`.
    async fn insert(&self, request: &ExchangeRequest) -> Result<(), ExchangeRequestRepositoryError>;

    /// Fetch a request by key.
    async fn find(
        &self,
        id: &RequestId,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Every stored request, in store order.
    async fn list_all(&self) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Requests whose owner reference is `owner`.
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Requests whose requester reference is `requester`.
    async fn list_by_requester(
        &self,
        requester: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Unconditional status overwrite. Last write wins.
    async fn set_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        at: DateTime<Utc>,
    ) -> Result<ExchangeRequest, ExchangeRequestRepositoryError>;

    /// Overwrite the status only while the request is still pending.
    ///
    /// Fails with `StaleStatus` when another write got there first.
    async fn resolve_pending(
        &self,
        id: &RequestId,
        status: RequestStatus,
        at: DateTime<Utc>,
    ) -> Result<ExchangeRequest, ExchangeRequestRepositoryError>;

    /// Approve a pending request and apply the requested side effects in one
    /// atomic step.
    async fn commit_approval(
        &self,
        commit: ApprovalCommit,
    ) -> Result<ApprovalOutcome, ExchangeRequestRepositoryError>;
}
