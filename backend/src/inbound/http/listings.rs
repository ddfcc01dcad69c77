//! Listing HTTP handlers.
//!
//! ```text
//! POST   /api/v1/listings
//! GET    /api/v1/listings/mine
//! GET    /api/v1/listings/{id}
//! PUT    /api/v1/listings/{id}/availability
//! DELETE /api/v1/listings/{id}
//! ```
//!
//! `/listings/mine` must be registered before `/listings/{id}`.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::Error;
use crate::domain::ports::{CreateListingRequest, SetAvailabilityRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{AvailabilityBody, CreateListingBody, ListingBody, MyListingsBody};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_listing_id};

const LISTING_ID: FieldName = FieldName::new("listingId");

/// Publish a listing owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body = CreateListingBody,
    responses(
        (status = 201, description = "Listing created", body = ListingBody),
        (status = 400, description = "Invalid listing", body = Error),
        (status = 401, description = "Sign in required", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["listings"],
    operation_id = "createListing",
    security(("SessionCookie" = []))
)]
#[post("/listings")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateListingBody>,
) -> ApiResult<HttpResponse> {
    let owner_id = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let listing = state
        .listings
        .create_listing(CreateListingRequest { owner_id, draft })
        .await?;
    Ok(HttpResponse::Created().json(ListingBody::from(listing)))
}

/// The signed-in user's listings with availability counts.
#[utoipa::path(
    get,
    path = "/api/v1/listings/mine",
    responses(
        (status = 200, description = "Owner listings", body = MyListingsBody),
        (status = 401, description = "Sign in required", body = Error)
    ),
    tags = ["listings"],
    operation_id = "myListings",
    security(("SessionCookie" = []))
)]
#[get("/listings/mine")]
pub async fn my_listings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MyListingsBody>> {
    let owner_id = session.require_user_id()?;
    let shelf = state.listings_query.my_listings(&owner_id).await?;
    Ok(web::Json(shelf.into()))
}

/// Fetch one listing.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing key")),
    responses(
        (status = 200, description = "Listing", body = ListingBody),
        (status = 404, description = "Unknown listing", body = Error)
    ),
    tags = ["listings"],
    operation_id = "getListing",
    security([])
)]
#[get("/listings/{id}")]
pub async fn get_listing(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingBody>> {
    let listing_id = parse_listing_id(&path, LISTING_ID)?;
    let listing = state.listings_query.get_listing(&listing_id).await?;
    Ok(web::Json(listing.into()))
}

/// Set or toggle availability of an owned listing.
#[utoipa::path(
    put,
    path = "/api/v1/listings/{id}/availability",
    params(("id" = String, Path, description = "Listing key")),
    request_body = AvailabilityBody,
    responses(
        (status = 200, description = "Updated listing", body = ListingBody),
        (status = 401, description = "Sign in required", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Unknown listing", body = Error)
    ),
    tags = ["listings"],
    operation_id = "setListingAvailability",
    security(("SessionCookie" = []))
)]
#[put("/listings/{id}/availability")]
pub async fn set_availability(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AvailabilityBody>,
) -> ApiResult<web::Json<ListingBody>> {
    let owner_id = session.require_user_id()?;
    let listing_id = parse_listing_id(&path, LISTING_ID)?;
    let listing = state
        .listings
        .set_availability(SetAvailabilityRequest {
            owner_id,
            listing_id,
            available: payload.available,
        })
        .await?;
    Ok(web::Json(listing.into()))
}

/// Permanently delete an owned listing.
#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing key")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Sign in required", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Unknown listing", body = Error)
    ),
    tags = ["listings"],
    operation_id = "deleteListing",
    security(("SessionCookie" = []))
)]
#[delete("/listings/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner_id = session.require_user_id()?;
    let listing_id = parse_listing_id(&path, LISTING_ID)?;
    state.listings.delete_listing(&owner_id, &listing_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "listings_tests.rs"]
mod tests;
