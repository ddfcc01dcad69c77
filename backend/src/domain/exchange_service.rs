//! Exchange request workflow service.
//!
//! Creates requests on behalf of prospective requesters and records owner
//! decisions. Decisions are checked against [`ExchangeRequest::decide`]
//! before anything is written, and the write itself is conditional on the
//! request still being pending, so two racing decisions cannot both land.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use super::listing_service::map_listing_repository_error;
use crate::domain::ports::{
    ApprovalCommit, ApprovalResponse, CreateExchangeRequest, ExchangeRequestCommand,
    ExchangeRequestRepository, ExchangeRequestRepositoryError, ListingRepository,
};
use crate::domain::{
    Decision, DecisionError, Error, ExchangeRequest, RequestId, RequestStatus, UserId,
};

const SEND_FAILED: &str = "failed to send request";

pub(super) fn map_request_repository_error(error: ExchangeRequestRepositoryError) -> Error {
    match error {
        ExchangeRequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("request store unavailable: {message}"))
        }
        ExchangeRequestRepositoryError::Query { message } => {
            Error::internal(format!("request store error: {message}"))
        }
        ExchangeRequestRepositoryError::DuplicateKey { id } => {
            Error::conflict(format!("request {id} already exists"))
        }
        ExchangeRequestRepositoryError::NotFound { id } => {
            Error::not_found(format!("request {id} not found"))
        }
        ExchangeRequestRepositoryError::StaleStatus { id, actual } => {
            Error::conflict(format!("request {id} is already {actual}"))
        }
    }
}

fn map_decision_error(error: DecisionError) -> Error {
    match error {
        DecisionError::NotOwner { .. } => {
            Error::forbidden("only the listing owner may decide on this request")
        }
        DecisionError::Transition(transition) => Error::conflict(transition.to_string()),
    }
}

/// Side effects applied when an owner approves a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalPolicy {
    /// Withdraw the listing from the feed by clearing its availability flag.
    pub close_listing: bool,
    /// Reject every other pending request for the same listing.
    pub reject_competing: bool,
}

impl ApprovalPolicy {
    /// Approval touches only the approved request. The listing stays
    /// available and competing requests stay pending.
    #[must_use]
    pub const fn request_only() -> Self {
        Self {
            close_listing: false,
            reject_competing: false,
        }
    }
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            close_listing: true,
            reject_competing: true,
        }
    }
}

/// Request workflow service implementing [`ExchangeRequestCommand`].
#[derive(Clone)]
pub struct ExchangeRequestService<L, R> {
    listings: Arc<L>,
    requests: Arc<R>,
    clock: Arc<dyn Clock>,
    policy: ApprovalPolicy,
}

impl<L, R> ExchangeRequestService<L, R> {
    /// Create a service with the default approval policy.
    pub fn new(listings: Arc<L>, requests: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            listings,
            requests,
            clock,
            policy: ApprovalPolicy::default(),
        }
    }

    /// Replace the approval policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ApprovalPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<L, R> ExchangeRequestService<L, R>
where
    L: ListingRepository,
    R: ExchangeRequestRepository,
{
    /// Load a request and check that `actor` may apply `decision` to it.
    async fn checked_decision(
        &self,
        request_id: &RequestId,
        actor: &UserId,
        decision: Decision,
    ) -> Result<ExchangeRequest, Error> {
        let request = self
            .requests
            .find(request_id)
            .await
            .map_err(map_request_repository_error)?
            .ok_or_else(|| Error::not_found(format!("request {request_id} not found")))?;
        request
            .decide(actor, decision, self.clock.utc())
            .map_err(map_decision_error)
    }
}

/// Store failures while sending collapse into one retryable message that
/// survives response redaction. Key collisions still surface as a conflict.
fn map_send_error(error: ExchangeRequestRepositoryError) -> Error {
    match error {
        ExchangeRequestRepositoryError::DuplicateKey { .. } => {
            Error::conflict("you have already requested this listing")
        }
        other => {
            warn!(error = %other, "request store failed while sending");
            Error::service_unavailable(SEND_FAILED)
        }
    }
}

#[async_trait]
impl<L, R> ExchangeRequestCommand for ExchangeRequestService<L, R>
where
    L: ListingRepository,
    R: ExchangeRequestRepository,
{
    async fn create_request(
        &self,
        request: CreateExchangeRequest,
    ) -> Result<ExchangeRequest, Error> {
        let listing = self
            .listings
            .find(&request.listing_id)
            .await
            .map_err(map_listing_repository_error)?
            .ok_or_else(|| Error::not_found(format!("listing {} not found", request.listing_id)))?;

        if listing.is_owned_by(&request.requester_id) {
            return Err(Error::invalid_request("you cannot request your own listing"));
        }
        if !listing.is_available() {
            return Err(Error::conflict("listing is no longer available"));
        }

        let exchange = ExchangeRequest::pending(
            listing.id().clone(),
            request.requester_id,
            listing.owner_id().clone(),
            &request.message,
            self.clock.utc(),
        );
        self.requests
            .insert(&exchange)
            .await
            .map_err(map_send_error)?;

        info!(
            request_id = %exchange.id(),
            listing_id = %exchange.listing_id(),
            "exchange request created"
        );
        Ok(exchange)
    }

    async fn approve(
        &self,
        request_id: &RequestId,
        actor: &UserId,
    ) -> Result<ApprovalResponse, Error> {
        let decided = self
            .checked_decision(request_id, actor, Decision::Approve)
            .await?;

        let outcome = self
            .requests
            .commit_approval(ApprovalCommit {
                request_id: decided.id().clone(),
                decided_at: decided.updated_at(),
                close_listing: self.policy.close_listing,
                reject_competing: self.policy.reject_competing,
            })
            .await
            .map_err(map_request_repository_error)?;

        info!(
            request_id = %request_id,
            listing_closed = outcome.listing_closed,
            rejected = outcome.rejected_competitors.len(),
            "exchange request approved"
        );
        Ok(ApprovalResponse {
            request: outcome.request,
            listing_closed: outcome.listing_closed,
            rejected_competitors: outcome.rejected_competitors,
        })
    }

    async fn reject(
        &self,
        request_id: &RequestId,
        actor: &UserId,
    ) -> Result<ExchangeRequest, Error> {
        let decided = self
            .checked_decision(request_id, actor, Decision::Reject)
            .await?;

        let stored = self
            .requests
            .resolve_pending(decided.id(), RequestStatus::Rejected, decided.updated_at())
            .await
            .map_err(map_request_repository_error)?;

        info!(request_id = %request_id, "exchange request rejected");
        Ok(stored)
    }
}

#[cfg(test)]
#[path = "exchange_service_tests.rs"]
mod tests;
