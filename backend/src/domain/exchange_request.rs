//! Exchange requests and their approval state machine.
//!
//! A request starts `pending`. The listing owner either approves or rejects
//! it, after which the request is terminal. `completed` is part of the stored
//! vocabulary but no operation produces it.
//!
//! ```text
//!            approve
//! pending ───────────► approved
//!    │
//!    │ reject
//!    ▼
//! rejected
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ListingId, UserId};

/// Lifecycle state of an exchange request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting the owner's decision.
    Pending,
    /// Accepted by the owner.
    Approved,
    /// Declined by the owner, or closed because a sibling was approved.
    Rejected,
    /// Hand-over finished. Declared for stored documents; never produced.
    Completed,
}

impl RequestStatus {
    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Apply an owner decision.
    ///
    /// # Examples
    /// ```
    /// use bookswap::domain::{Decision, RequestStatus};
    ///
    /// assert_eq!(
    ///     RequestStatus::Pending.transition(Decision::Approve),
    ///     Ok(RequestStatus::Approved)
    /// );
    /// assert!(RequestStatus::Rejected.transition(Decision::Approve).is_err());
    /// ```
    pub fn transition(self, decision: Decision) -> Result<Self, TransitionError> {
        match (self, decision) {
            (Self::Pending, Decision::Approve) => Ok(Self::Approved),
            (Self::Pending, Decision::Reject) => Ok(Self::Rejected),
            (current, decision) => Err(TransitionError { current, decision }),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Accept the request.
    Approve,
    /// Decline the request.
    Reject,
}

impl Decision {
    /// Verb used in messages and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// A decision was applied to a request that is no longer pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {} a request that is {current}", decision.as_str())]
pub struct TransitionError {
    /// Status at the time of the attempt.
    pub current: RequestStatus,
    /// Decision that was refused.
    pub decision: Decision,
}

/// Reasons an owner decision is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    /// The acting user does not own the requested listing.
    #[error("user {actor} does not own the requested listing")]
    NotOwner {
        /// User that attempted the decision.
        actor: UserId,
    },
    /// The request already left the pending state.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Deterministic request key derived from the listing and the requester.
///
/// Two requests by the same user for the same listing share a key, so the
/// store rejects the second insert instead of relying on a prior lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Key for `requester`'s request on `listing`.
    ///
    /// # Examples
    /// ```
    /// use bookswap::domain::{ListingId, RequestId, UserId};
    ///
    /// let listing = ListingId::new("l1").expect("listing");
    /// let requester = UserId::new("u2").expect("user");
    /// assert_eq!(
    ///     RequestId::for_pair(&listing, &requester),
    ///     RequestId::for_pair(&listing, &requester)
    /// );
    /// ```
    #[must_use]
    pub fn for_pair(listing_id: &ListingId, requester_id: &UserId) -> Self {
        Self(format!("{listing_id}_{requester_id}"))
    }

    /// Wrap a key received from a client. Returns `None` when blank.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A proposal to acquire another user's listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    id: RequestId,
    listing_id: ListingId,
    requester_id: UserId,
    owner_id: UserId,
    message: String,
    status: RequestStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ExchangeRequest {
    /// Build a pending request. The message is trimmed and kept as `""` when
    /// empty.
    #[must_use]
    pub fn pending(
        listing_id: ListingId,
        requester_id: UserId,
        owner_id: UserId,
        message: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RequestId::for_pair(&listing_id, &requester_id),
            listing_id,
            requester_id,
            owner_id,
            message: message.trim().to_owned(),
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Store key.
    #[must_use]
    pub fn id(&self) -> &RequestId {
        &self.id
    }

    /// Requested listing.
    #[must_use]
    pub fn listing_id(&self) -> &ListingId {
        &self.listing_id
    }

    /// User asking for the listing.
    #[must_use]
    pub fn requester_id(&self) -> &UserId {
        &self.requester_id
    }

    /// Listing owner at the time of the request.
    #[must_use]
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Note from the requester; possibly empty.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last status write.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Guarded owner decision: checks the actor and the current status and
    /// returns the updated request without touching `self`.
    pub fn decide(
        &self,
        actor: &UserId,
        decision: Decision,
        now: DateTime<Utc>,
    ) -> Result<Self, DecisionError> {
        if actor != &self.owner_id {
            return Err(DecisionError::NotOwner {
                actor: actor.clone(),
            });
        }
        let status = self.status.transition(decision)?;
        let mut updated = self.clone();
        updated.status = status;
        updated.updated_at = now;
        Ok(updated)
    }

    /// Unconditional status write. Last write wins; no actor or state check.
    pub fn overwrite_status(&mut self, status: RequestStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}

#[cfg(test)]
#[path = "exchange_request_tests.rs"]
mod tests;
