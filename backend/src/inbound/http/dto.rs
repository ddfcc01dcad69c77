//! Request and response bodies for the HTTP adapter.
//!
//! Field names are camelCase on the wire. Domain types convert into these
//! bodies through `From`; inbound bodies are validated into domain drafts.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ApprovalResponse, InboxEntry, OwnerListings};
use crate::domain::{
    Condition, Error, ExchangeRequest, Listing, ListingDraft, ListingSummary, RequestStatus,
};
use crate::inbound::http::validation::{FieldName, parse_condition};

/// Payload for publishing a listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingBody {
    /// Book or notes title.
    #[schema(example = "Engineering Mathematics II")]
    pub title: String,
    /// Subject or branch tag.
    #[schema(example = "CSE")]
    pub subject: String,
    /// Author, when known.
    #[serde(default)]
    pub author: Option<String>,
    /// Free-form category.
    #[serde(default)]
    pub category: Option<String>,
    /// Syllabus regulation tag.
    #[serde(default)]
    #[schema(example = "R20")]
    pub regulation: Option<String>,
    /// Academic year.
    #[serde(default)]
    pub year: Option<String>,
    /// Asking price in minor units. Absent or zero means free.
    #[serde(default)]
    pub price: Option<u64>,
    /// `excellent`, `good`, `fair` or `poor`; defaults to `good`.
    #[serde(default)]
    pub condition: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Image references in display order.
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl CreateListingBody {
    /// Validate the body into a listing draft.
    pub(crate) fn into_draft(self) -> Result<ListingDraft, Error> {
        let condition = parse_condition(self.condition.as_deref(), FieldName::new("condition"))?;
        Ok(ListingDraft {
            title: self.title,
            subject: self.subject,
            author: self.author,
            category: self.category,
            regulation: self.regulation,
            year: self.year,
            price_minor_units: self.price,
            condition,
            description: self.description.unwrap_or_default(),
            image_urls: self.image_urls,
        })
    }
}

/// Payload for changing availability. Omit `available` to toggle.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityBody {
    /// New flag value.
    #[serde(default)]
    pub available: Option<bool>,
}

/// Payload for requesting a listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    /// Optional note for the owner.
    #[serde(default)]
    pub message: String,
}

/// Feed filter query parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedParams {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// Exact subject tag.
    pub subject: Option<String>,
    /// Exact regulation tag.
    pub regulation: Option<String>,
}

/// Listing as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingBody {
    /// Listing key.
    pub id: String,
    /// Title.
    pub title: String,
    /// Subject tag.
    pub subject: String,
    /// Author, if supplied.
    pub author: Option<String>,
    /// Category, if supplied.
    pub category: Option<String>,
    /// Regulation tag, if supplied.
    pub regulation: Option<String>,
    /// Academic year, if supplied.
    pub year: Option<String>,
    /// Price in minor units; `null` means free.
    pub price: Option<u64>,
    /// Condition grade.
    pub condition: Condition,
    /// Image references.
    pub image_urls: Vec<String>,
    /// Description.
    pub description: String,
    /// Whether the listing is currently offered.
    pub available: bool,
    /// Owning user.
    pub owner_id: String,
    /// RFC 3339 creation time.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Listing> for ListingBody {
    fn from(value: Listing) -> Self {
        Self {
            id: value.id().to_string(),
            title: value.title().to_owned(),
            subject: value.subject().to_owned(),
            author: value.author().map(str::to_owned),
            category: value.category().map(str::to_owned),
            regulation: value.regulation().map(str::to_owned),
            year: value.year().map(str::to_owned),
            price: value.price().map(|price| price.minor_units()),
            condition: value.condition(),
            image_urls: value.image_urls().to_vec(),
            description: value.description().to_owned(),
            available: value.is_available(),
            owner_id: value.owner_id().to_string(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

/// An owner's shelf with counts.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyListingsBody {
    /// Listings, newest first.
    pub listings: Vec<ListingBody>,
    /// Number of available listings.
    pub available_count: usize,
    /// Number of withdrawn listings.
    pub unavailable_count: usize,
}

impl From<OwnerListings> for MyListingsBody {
    fn from(value: OwnerListings) -> Self {
        Self {
            listings: value.listings.into_iter().map(ListingBody::from).collect(),
            available_count: value.available_count,
            unavailable_count: value.unavailable_count,
        }
    }
}

/// Visible feed.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedBody {
    /// Listings in store order.
    pub listings: Vec<ListingBody>,
}

/// Distinct subjects in the visible feed.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectsBody {
    /// Subjects, first seen first.
    pub subjects: Vec<String>,
}

/// Exchange request as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequestBody {
    /// Request key.
    pub id: String,
    /// Requested listing.
    pub listing_id: String,
    /// Requesting user.
    pub requester_id: String,
    /// Listing owner.
    pub owner_id: String,
    /// Note from the requester; empty when none was given.
    pub message: String,
    /// Lifecycle state.
    pub status: RequestStatus,
    /// RFC 3339 creation time.
    #[schema(format = "date-time")]
    pub created_at: String,
    /// RFC 3339 time of the last status write.
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<ExchangeRequest> for ExchangeRequestBody {
    fn from(value: ExchangeRequest) -> Self {
        Self {
            id: value.id().to_string(),
            listing_id: value.listing_id().to_string(),
            requester_id: value.requester_id().to_string(),
            owner_id: value.owner_id().to_string(),
            message: value.message().to_owned(),
            status: value.status(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

/// Listing fields shown next to a request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummaryBody {
    /// Listing key.
    pub id: String,
    /// Title.
    pub title: String,
    /// Author, if supplied.
    pub author: Option<String>,
    /// First image, if any.
    pub image_url: Option<String>,
}

impl From<ListingSummary> for ListingSummaryBody {
    fn from(value: ListingSummary) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            author: value.author,
            image_url: value.image_url,
        }
    }
}

/// A request with its listing summary.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboxEntryBody {
    /// The request.
    pub request: ExchangeRequestBody,
    /// Listing summary; `null` when the listing is unavailable for display.
    pub listing: Option<ListingSummaryBody>,
}

impl From<InboxEntry> for InboxEntryBody {
    fn from(value: InboxEntry) -> Self {
        Self {
            request: value.request.into(),
            listing: value.listing.map(Into::into),
        }
    }
}

/// Received or sent requests, newest first.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboxBody {
    /// Entries, newest first.
    pub requests: Vec<InboxEntryBody>,
    /// Pending received requests; only present on the received list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_count: Option<usize>,
}

/// Result of an approval.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalBody {
    /// The approved request.
    pub request: ExchangeRequestBody,
    /// Whether the listing was withdrawn.
    pub listing_closed: bool,
    /// Keys of competing requests that were rejected.
    pub rejected_competitors: Vec<String>,
}

impl From<ApprovalResponse> for ApprovalBody {
    fn from(value: ApprovalResponse) -> Self {
        Self {
            request: value.request.into(),
            listing_closed: value.listing_closed,
            rejected_competitors: value
                .rejected_competitors
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}
