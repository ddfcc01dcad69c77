//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by storage adapters. Driving
//! ports (`*Command`, `*Query`) are implemented by domain services and called
//! by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod exchange_request_command;
mod exchange_request_query;
mod exchange_request_repository;
mod feed_query;
mod listing_command;
mod listing_query;
mod listing_repository;

#[cfg(test)]
pub use exchange_request_command::MockExchangeRequestCommand;
pub use exchange_request_command::{
    ApprovalResponse, CreateExchangeRequest, ExchangeRequestCommand,
};
#[cfg(test)]
pub use exchange_request_query::MockExchangeRequestQuery;
pub use exchange_request_query::{ExchangeRequestQuery, InboxEntry};
#[cfg(test)]
pub use exchange_request_repository::MockExchangeRequestRepository;
pub use exchange_request_repository::{
    ApprovalCommit, ApprovalOutcome, ExchangeRequestRepository, ExchangeRequestRepositoryError,
};
#[cfg(test)]
pub use feed_query::MockFeedQuery;
pub use feed_query::FeedQuery;
#[cfg(test)]
pub use listing_command::MockListingCommand;
pub use listing_command::{CreateListingRequest, ListingCommand, SetAvailabilityRequest};
#[cfg(test)]
pub use listing_query::MockListingQuery;
pub use listing_query::{ListingQuery, OwnerListings};
#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{ListingRepository, ListingRepositoryError};
