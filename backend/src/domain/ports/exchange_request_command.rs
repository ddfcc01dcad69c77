//! Driving port for the request workflow.

use async_trait::async_trait;

use crate::domain::{Error, ExchangeRequest, ListingId, RequestId, UserId};

/// Request to ask for someone else's listing.
#[derive(Debug, Clone)]
pub struct CreateExchangeRequest {
    /// Listing being requested.
    pub listing_id: ListingId,
    /// User making the request.
    pub requester_id: UserId,
    /// Optional note for the owner.
    pub message: String,
}

/// Result of an owner approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalResponse {
    /// The approved request.
    pub request: ExchangeRequest,
    /// Whether the listing was withdrawn as part of the approval.
    pub listing_closed: bool,
    /// Other pending requests that were rejected.
    pub rejected_competitors: Vec<RequestId>,
}

/// Operations that create requests and record owner decisions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRequestCommand: Send + Sync {
    /// Create a pending request on another user's available listing.
    ///
    /// # Errors
    ///
    /// - `not_found` when the listing does not exist.
    /// - `invalid_request` when the requester owns the listing.
    /// - `conflict` when the listing is unavailable or the requester already
    ///   asked for it.
    /// - `service_unavailable` / `internal_error` when the store fails.
    async fn create_request(&self, request: CreateExchangeRequest)
    -> Result<ExchangeRequest, Error>;

    /// Approve a pending request as the listing owner.
    ///
    /// # Errors
    ///
    /// `not_found`, `forbidden` for non-owners, `conflict` when the request
    /// is no longer pending.
    async fn approve(&self, request_id: &RequestId, actor: &UserId)
    -> Result<ApprovalResponse, Error>;

    /// Reject a pending request as the listing owner.
    ///
    /// # Errors
    ///
    /// Same as [`ExchangeRequestCommand::approve`].
    async fn reject(&self, request_id: &RequestId, actor: &UserId)
    -> Result<ExchangeRequest, Error>;
}
