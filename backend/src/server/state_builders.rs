//! Wiring of domain services onto the in-memory document store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use bookswap::domain::{ExchangeRequestService, FeedService, InboxService, ListingService};
use bookswap::inbound::http::state::HttpState;
use bookswap::outbound::memory::MemoryDocumentStore;

use super::ServerConfig;

/// Build the handler state. Every service shares one store so approval
/// side effects are visible to the feed and inbox immediately.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let store = Arc::new(MemoryDocumentStore::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let listings = Arc::new(ListingService::new(store.clone(), clock.clone()));
    let requests = ExchangeRequestService::new(store.clone(), store.clone(), clock)
        .with_policy(config.approval_policy);

    web::Data::new(HttpState {
        listings: listings.clone(),
        listings_query: listings,
        requests: Arc::new(requests),
        inbox: Arc::new(InboxService::new(store.clone(), store.clone())),
        feed: Arc::new(FeedService::new(store.clone(), store)),
    })
}
