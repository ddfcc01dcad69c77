//! Shared HTTP adapter state.
//!
//! Handlers receive this state through `actix_web::web::Data` and only see
//! driving ports, so they stay testable without a store.

use std::sync::Arc;

use crate::domain::ports::{
    ExchangeRequestCommand, ExchangeRequestQuery, FeedQuery, ListingCommand, ListingQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Owner-side listing mutations.
    pub listings: Arc<dyn ListingCommand>,
    /// Listing reads.
    pub listings_query: Arc<dyn ListingQuery>,
    /// Request creation and owner decisions.
    pub requests: Arc<dyn ExchangeRequestCommand>,
    /// Received and sent request lists.
    pub inbox: Arc<dyn ExchangeRequestQuery>,
    /// Browse feed.
    pub feed: Arc<dyn FeedQuery>,
}
