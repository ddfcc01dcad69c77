//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes `invalid_request` with `details` naming the field,
//! the rejected value and a stable code.

use serde_json::json;

use crate::domain::{Condition, Error, ListingId, RequestId};

/// Validation codes placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    BlankId,
    UnknownCondition,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::BlankId => "blank_id",
            Self::UnknownCondition => "unknown_condition",
        }
    }
}

/// HTTP-facing field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

fn field_error(field: FieldName, code: ValidationCode, value: &str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.0,
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_listing_id(raw: &str, field: FieldName) -> Result<ListingId, Error> {
    ListingId::new(raw.trim()).map_err(|_| {
        field_error(
            field,
            ValidationCode::BlankId,
            raw,
            format!("{} must not be blank", field.0),
        )
    })
}

pub(crate) fn parse_request_id(raw: &str, field: FieldName) -> Result<RequestId, Error> {
    RequestId::parse(raw).ok_or_else(|| {
        field_error(
            field,
            ValidationCode::BlankId,
            raw,
            format!("{} must not be blank", field.0),
        )
    })
}

/// Absent or blank conditions fall back to the default grade.
pub(crate) fn parse_condition(raw: Option<&str>, field: FieldName) -> Result<Condition, Error> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(Condition::default()),
        Some(value) => value.parse().map_err(|_| {
            field_error(
                field,
                ValidationCode::UnknownCondition,
                value,
                format!("{} must be one of excellent, good, fair or poor", field.0),
            )
        }),
    }
}
