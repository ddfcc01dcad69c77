//! User identity as seen by the marketplace.
//!
//! Accounts live with the external sign-in provider; listings and requests
//! only store the provider's opaque user id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length for a user id.
pub const USER_ID_MAX: usize = 128;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The id was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The id had leading or trailing whitespace.
    #[error("user id must not contain surrounding whitespace")]
    PaddedId,
    /// The id exceeded [`USER_ID_MAX`] characters.
    #[error("user id must be at most {max} characters")]
    IdTooLong {
        /// Upper bound that was exceeded.
        max: usize,
    },
}

/// Opaque identifier issued by the sign-in provider.
///
/// # Examples
/// ```
/// use bookswap::domain::UserId;
///
/// let id = UserId::new("u1").expect("valid id");
/// assert_eq!(id.as_ref(), "u1");
/// assert!(UserId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and wrap a provider id.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::PaddedId);
        }
        if id.chars().count() > USER_ID_MAX {
            return Err(UserValidationError::IdTooLong { max: USER_ID_MAX });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("   ", UserValidationError::EmptyId)]
    #[case(" u1", UserValidationError::PaddedId)]
    #[case("u1\n", UserValidationError::PaddedId)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn rejects_overlong_ids() {
        let raw = "x".repeat(USER_ID_MAX + 1);
        assert_eq!(
            UserId::new(raw),
            Err(UserValidationError::IdTooLong { max: USER_ID_MAX })
        );
    }

    #[rstest]
    fn deserialisation_validates() {
        let ok: UserId = serde_json::from_str("\"Xy9kQ2\"").expect("valid id");
        assert_eq!(ok.as_ref(), "Xy9kQ2");
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
