//! Browse feed HTTP handlers.
//!
//! ```text
//! GET /api/v1/feed?title=&subject=&regulation=
//! GET /api/v1/feed/subjects
//! ```
//!
//! Both endpoints accept anonymous callers. A signed-in caller does not see
//! their own listings in the feed.

use actix_web::{get, web};

use crate::domain::{Error, FeedFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{FeedBody, FeedParams, ListingBody, SubjectsBody};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Visible listings, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/v1/feed",
    params(FeedParams),
    responses(
        (status = 200, description = "Visible feed", body = FeedBody),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["feed"],
    operation_id = "visibleFeed",
    security([])
)]
#[get("/feed")]
pub async fn visible_feed(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<FeedParams>,
) -> ApiResult<web::Json<FeedBody>> {
    let viewer = session.user_id()?;
    let FeedParams {
        title,
        subject,
        regulation,
    } = params.into_inner();
    let listings = state
        .feed
        .visible_feed(viewer, FeedFilter::new(title, subject, regulation))
        .await?;
    Ok(web::Json(FeedBody {
        listings: listings.into_iter().map(ListingBody::from).collect(),
    }))
}

/// Subjects present in the visible feed.
#[utoipa::path(
    get,
    path = "/api/v1/feed/subjects",
    responses(
        (status = 200, description = "Distinct subjects", body = SubjectsBody)
    ),
    tags = ["feed"],
    operation_id = "feedSubjects",
    security([])
)]
#[get("/feed/subjects")]
pub async fn feed_subjects(state: web::Data<HttpState>) -> ApiResult<web::Json<SubjectsBody>> {
    let subjects = state.feed.feed_subjects().await?;
    Ok(web::Json(SubjectsBody { subjects }))
}
