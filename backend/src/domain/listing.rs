//! Book and notes listings.
//!
//! A [`Listing`] is created by its owner from a [`ListingDraft`]. After
//! creation the owner can only flip the availability flag or delete the
//! listing; the owner reference never changes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Maximum accepted title length in characters.
pub const TITLE_MAX: usize = 200;

/// Validation errors raised while building listings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    /// Listing ids must not be blank.
    #[error("listing id must not be empty")]
    EmptyId,
    /// Titles must not be blank.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Titles are capped at [`TITLE_MAX`] characters.
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// Upper bound that was exceeded.
        max: usize,
    },
    /// Subjects must not be blank.
    #[error("subject must not be empty")]
    EmptySubject,
    /// The condition string did not name a known grade.
    #[error("unknown condition `{value}`")]
    UnknownCondition {
        /// Rejected input.
        value: String,
    },
}

/// Opaque listing key assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingId(String);

impl ListingId {
    /// Wrap an existing key.
    pub fn new(id: impl Into<String>) -> Result<Self, ListingValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ListingValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Allocate a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for ListingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ListingId> for String {
    fn from(value: ListingId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ListingId {
    type Error = ListingValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Physical condition grade.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Like new.
    Excellent,
    /// Normal wear.
    #[default]
    Good,
    /// Noticeable wear, fully usable.
    Fair,
    /// Heavily worn.
    Poor,
}

impl Condition {
    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = ListingValidationError;

    // Case-insensitive: forms submit capitalised grades such as "Good".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            _ => Err(ListingValidationError::UnknownCondition {
                value: s.to_owned(),
            }),
        }
    }
}

/// Asking price in minor currency units. A listing without a price is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Interpret a submitted amount. Zero means "free" and yields `None`.
    #[must_use]
    pub fn from_minor_units(amount: u64) -> Option<Self> {
        (amount > 0).then_some(Self(amount))
    }

    /// Amount in minor units.
    #[must_use]
    pub fn minor_units(self) -> u64 {
        self.0
    }
}

/// Owner-supplied fields for a new listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDraft {
    /// Book or notes title.
    pub title: String,
    /// Subject or branch tag.
    pub subject: String,
    /// Author, when known.
    pub author: Option<String>,
    /// Free-form category.
    pub category: Option<String>,
    /// Syllabus regulation tag such as `R20`.
    pub regulation: Option<String>,
    /// Academic year the material targets.
    pub year: Option<String>,
    /// Asking price in minor units; `None` or zero means free.
    pub price_minor_units: Option<u64>,
    /// Condition grade.
    pub condition: Condition,
    /// Free-text description.
    pub description: String,
    /// Image references, in display order.
    pub image_urls: Vec<String>,
}

fn trimmed_non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// A book or notes offering.
///
/// # Examples
/// ```
/// use bookswap::domain::{Listing, ListingDraft, ListingId, UserId};
/// use chrono::Utc;
///
/// let draft = ListingDraft {
///     title: "  Signals and Systems ".to_owned(),
///     subject: "ECE".to_owned(),
///     ..ListingDraft::default()
/// };
/// let owner = UserId::new("u1").expect("owner");
/// let listing = Listing::create(ListingId::generate(), owner, draft, Utc::now())
///     .expect("valid draft");
///
/// assert_eq!(listing.title(), "Signals and Systems");
/// assert!(listing.is_available());
/// assert!(listing.price().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    id: ListingId,
    title: String,
    subject: String,
    author: Option<String>,
    category: Option<String>,
    regulation: Option<String>,
    year: Option<String>,
    price: Option<Price>,
    condition: Condition,
    image_urls: Vec<String>,
    description: String,
    available: bool,
    owner_id: UserId,
    created_at: DateTime<Utc>,
}

impl Listing {
    /// Validate a draft and build an available listing.
    pub fn create(
        id: ListingId,
        owner_id: UserId,
        draft: ListingDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ListingValidationError> {
        let title = draft.title.trim().to_owned();
        if title.is_empty() {
            return Err(ListingValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(ListingValidationError::TitleTooLong { max: TITLE_MAX });
        }
        let subject = draft.subject.trim().to_owned();
        if subject.is_empty() {
            return Err(ListingValidationError::EmptySubject);
        }

        Ok(Self {
            id,
            title,
            subject,
            author: trimmed_non_empty(draft.author),
            category: trimmed_non_empty(draft.category),
            regulation: trimmed_non_empty(draft.regulation),
            year: trimmed_non_empty(draft.year),
            price: draft.price_minor_units.and_then(Price::from_minor_units),
            condition: draft.condition,
            image_urls: draft
                .image_urls
                .into_iter()
                .map(|url| url.trim().to_owned())
                .filter(|url| !url.is_empty())
                .collect(),
            description: draft.description.trim().to_owned(),
            available: true,
            owner_id,
            created_at,
        })
    }

    /// Store key.
    #[must_use]
    pub fn id(&self) -> &ListingId {
        &self.id
    }

    /// Title, trimmed.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Subject tag.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Author, if supplied.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Category, if supplied.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Regulation tag, if supplied.
    #[must_use]
    pub fn regulation(&self) -> Option<&str> {
        self.regulation.as_deref()
    }

    /// Academic year, if supplied.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    /// Asking price; `None` means free.
    #[must_use]
    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// Condition grade.
    #[must_use]
    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// Image references.
    #[must_use]
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    /// Description, trimmed; may be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the owner currently offers the listing.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Owning user.
    #[must_use]
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True when `user` owns this listing.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// Set the availability flag, the only post-creation mutation.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Short projection used when composing request views.
    #[must_use]
    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            image_url: self.image_urls.first().cloned(),
        }
    }
}

/// Listing fields shown next to an exchange request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummary {
    /// Listing key.
    pub id: ListingId,
    /// Title.
    pub title: String,
    /// Author, if supplied.
    pub author: Option<String>,
    /// First image reference, if any.
    pub image_url: Option<String>,
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
