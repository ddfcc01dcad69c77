//! Exchange request HTTP handlers.
//!
//! ```text
//! POST /api/v1/listings/{id}/requests
//! GET  /api/v1/requests/received
//! GET  /api/v1/requests/sent
//! POST /api/v1/requests/{id}/approve
//! POST /api/v1/requests/{id}/reject
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::Error;
use crate::domain::ports::CreateExchangeRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    ApprovalBody, CreateRequestBody, ExchangeRequestBody, InboxBody, InboxEntryBody,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_listing_id, parse_request_id};

const REQUEST_ID: FieldName = FieldName::new("requestId");

/// Ask the owner of a listing for it.
#[utoipa::path(
    post,
    path = "/api/v1/listings/{id}/requests",
    params(("id" = String, Path, description = "Listing key")),
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request created", body = ExchangeRequestBody),
        (status = 400, description = "Own listing", body = Error),
        (status = 401, description = "Sign in required", body = Error),
        (status = 404, description = "Unknown listing", body = Error),
        (status = 409, description = "Unavailable or already requested", body = Error),
        (status = 503, description = "Failed to send request", body = Error)
    ),
    tags = ["requests"],
    operation_id = "createExchangeRequest",
    security(("SessionCookie" = []))
)]
#[post("/listings/{id}/requests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateRequestBody>,
) -> ApiResult<HttpResponse> {
    let requester_id = session.require_user_id()?;
    let listing_id = parse_listing_id(&path, FieldName::new("listingId"))?;
    let request = state
        .requests
        .create_request(CreateExchangeRequest {
            listing_id,
            requester_id,
            message: payload.into_inner().message,
        })
        .await?;
    Ok(HttpResponse::Created().json(ExchangeRequestBody::from(request)))
}

/// Requests addressed to the signed-in user, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/requests/received",
    responses(
        (status = 200, description = "Received requests", body = InboxBody),
        (status = 401, description = "Sign in required", body = Error)
    ),
    tags = ["requests"],
    operation_id = "receivedRequests",
    security(("SessionCookie" = []))
)]
#[get("/requests/received")]
pub async fn received(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<InboxBody>> {
    let owner_id = session.require_user_id()?;
    let entries = state.inbox.received(&owner_id).await?;
    let pending_count = state.inbox.pending_received_count(&owner_id).await?;
    Ok(web::Json(InboxBody {
        requests: entries.into_iter().map(InboxEntryBody::from).collect(),
        pending_count: Some(pending_count),
    }))
}

/// Requests made by the signed-in user, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/requests/sent",
    responses(
        (status = 200, description = "Sent requests", body = InboxBody),
        (status = 401, description = "Sign in required", body = Error)
    ),
    tags = ["requests"],
    operation_id = "sentRequests",
    security(("SessionCookie" = []))
)]
#[get("/requests/sent")]
pub async fn sent(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<InboxBody>> {
    let requester_id = session.require_user_id()?;
    let entries = state.inbox.sent(&requester_id).await?;
    Ok(web::Json(InboxBody {
        requests: entries.into_iter().map(InboxEntryBody::from).collect(),
        pending_count: None,
    }))
}

/// Approve a pending request on one of the signed-in user's listings.
#[utoipa::path(
    post,
    path = "/api/v1/requests/{id}/approve",
    params(("id" = String, Path, description = "Request key")),
    responses(
        (status = 200, description = "Request approved", body = ApprovalBody),
        (status = 401, description = "Sign in required", body = Error),
        (status = 403, description = "Not the listing owner", body = Error),
        (status = 404, description = "Unknown request", body = Error),
        (status = 409, description = "Request is no longer pending", body = Error)
    ),
    tags = ["requests"],
    operation_id = "approveRequest",
    security(("SessionCookie" = []))
)]
#[post("/requests/{id}/approve")]
pub async fn approve(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ApprovalBody>> {
    let actor = session.require_user_id()?;
    let request_id = parse_request_id(&path, REQUEST_ID)?;
    let response = state.requests.approve(&request_id, &actor).await?;
    Ok(web::Json(response.into()))
}

/// Reject a pending request on one of the signed-in user's listings.
#[utoipa::path(
    post,
    path = "/api/v1/requests/{id}/reject",
    params(("id" = String, Path, description = "Request key")),
    responses(
        (status = 200, description = "Request rejected", body = ExchangeRequestBody),
        (status = 401, description = "Sign in required", body = Error),
        (status = 403, description = "Not the listing owner", body = Error),
        (status = 404, description = "Unknown request", body = Error),
        (status = 409, description = "Request is no longer pending", body = Error)
    ),
    tags = ["requests"],
    operation_id = "rejectRequest",
    security(("SessionCookie" = []))
)]
#[post("/requests/{id}/reject")]
pub async fn reject(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ExchangeRequestBody>> {
    let actor = session.require_user_id()?;
    let request_id = parse_request_id(&path, REQUEST_ID)?;
    let request = state.requests.reject(&request_id, &actor).await?;
    Ok(web::Json(request.into()))
}

#[cfg(test)]
#[path = "requests_tests.rs"]
mod tests;
