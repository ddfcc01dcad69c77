//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint and body schema. The document is
//! served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Condition, Error, ErrorCode, RequestStatus};
use crate::inbound::http::dto::{
    ApprovalBody, AvailabilityBody, CreateListingBody, CreateRequestBody, ExchangeRequestBody,
    FeedBody, InboxBody, InboxEntryBody, ListingBody, ListingSummaryBody, MyListingsBody,
    SubjectsBody,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie written by the external sign-in flow.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bookswap API",
        description = "Peer-to-peer exchange of used books and notes between students."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::my_listings,
        crate::inbound::http::listings::get_listing,
        crate::inbound::http::listings::set_availability,
        crate::inbound::http::listings::delete_listing,
        crate::inbound::http::requests::create_request,
        crate::inbound::http::requests::received,
        crate::inbound::http::requests::sent,
        crate::inbound::http::requests::approve,
        crate::inbound::http::requests::reject,
        crate::inbound::http::feed::visible_feed,
        crate::inbound::http::feed::feed_subjects,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Condition,
        RequestStatus,
        CreateListingBody,
        AvailabilityBody,
        CreateRequestBody,
        ListingBody,
        MyListingsBody,
        FeedBody,
        SubjectsBody,
        ExchangeRequestBody,
        ListingSummaryBody,
        InboxEntryBody,
        InboxBody,
        ApprovalBody,
    )),
    tags(
        (name = "listings", description = "Publishing and managing listings"),
        (name = "requests", description = "Exchange requests and owner decisions"),
        (name = "feed", description = "Browsing available listings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn approval_schema_reports_side_effects() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let approval = schemas.get("ApprovalBody").expect("ApprovalBody schema");

        assert_object_schema_has_field(approval, "listingClosed");
        assert_object_schema_has_field(approval, "rejectedCompetitors");
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/listings",
            "/api/v1/listings/mine",
            "/api/v1/listings/{id}",
            "/api/v1/listings/{id}/availability",
            "/api/v1/listings/{id}/requests",
            "/api/v1/requests/received",
            "/api/v1/requests/sent",
            "/api/v1/requests/{id}/approve",
            "/api/v1/requests/{id}/reject",
            "/api/v1/feed",
            "/api/v1/feed/subjects",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }
}
