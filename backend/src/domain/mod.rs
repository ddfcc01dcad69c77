//! Domain primitives, aggregates and services.
//!
//! Purpose: model listings, exchange requests and the visible feed without
//! any I/O. Services implement the driving ports in [`ports`] on top of the
//! driven repository ports, which adapters supply.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Listing, ExchangeRequest: the two stored document kinds.
//! - compute_visible_feed: the pure feed rule.
//! - ListingService, ExchangeRequestService, InboxService, FeedService.

pub mod error;
pub mod exchange_request;
mod exchange_service;
pub mod feed;
mod feed_service;
mod inbox_service;
pub mod listing;
mod listing_service;
pub mod ports;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::exchange_request::{
    Decision, DecisionError, ExchangeRequest, RequestId, RequestStatus, TransitionError,
};
pub use self::exchange_service::{ApprovalPolicy, ExchangeRequestService};
pub use self::feed::{FeedFilter, compute_visible_feed, feed_subjects};
pub use self::feed_service::FeedService;
pub use self::inbox_service::InboxService;
pub use self::listing::{
    Condition, Listing, ListingDraft, ListingId, ListingSummary, ListingValidationError, Price,
    TITLE_MAX,
};
pub use self::listing_service::ListingService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USER_ID_MAX, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use bookswap::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("not your listing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
