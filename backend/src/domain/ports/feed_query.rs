//! Driving port for the browse feed.

use async_trait::async_trait;

use crate::domain::{Error, FeedFilter, Listing, UserId};

/// Read access to the visible feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Visible listings, narrowed by `filter`. When `viewer` is set their own
    /// listings are left out.
    async fn visible_feed(
        &self,
        viewer: Option<UserId>,
        filter: FeedFilter,
    ) -> Result<Vec<Listing>, Error>;

    /// Distinct subjects across the visible feed, first seen first.
    async fn feed_subjects(&self) -> Result<Vec<String>, Error>;
}
