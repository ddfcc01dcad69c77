//! HTTP inbound adapter exposing REST endpoints.

pub mod dto;
pub mod error;
pub mod feed;
pub mod health;
pub mod listings;
pub mod requests;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` endpoint on `cfg`.
///
/// Callers mount this inside `web::scope("/api/v1")` behind the session
/// middleware. JSON and query extraction failures are reported as
/// `invalid_request` errors.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(listings::create_listing)
        .service(listings::my_listings)
        .service(listings::get_listing)
        .service(listings::set_availability)
        .service(listings::delete_listing)
        .service(requests::create_request)
        .service(requests::received)
        .service(requests::sent)
        .service(requests::approve)
        .service(requests::reject)
        .service(feed::visible_feed)
        .service(feed::feed_subjects);
}
