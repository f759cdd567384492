//! Raw timestamp attributes recorded on a content item.
//!
//! The source-loading stage records when a post was created, last modified,
//! and last rendered. An unpublished post carries the literal marker
//! `DRAFT` in place of its creation timestamp; [`RawTimestamp`] keeps that
//! distinction in the type so draft handling is a single `match` instead of
//! string comparisons scattered through the formatting logic.

use serde::{Deserialize, Serialize};

/// Marker value for unpublished content.
pub const DRAFT: &str = "DRAFT";

/// A raw timestamp attribute from file metadata.
///
/// Either a timestamp string (validated later by the date formatter) or the
/// [`DRAFT`] marker. Serializes as a plain string; the literal `"DRAFT"`
/// round-trips to [`RawTimestamp::Draft`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RawTimestamp {
    /// The item is unpublished.
    Draft,
    /// A timestamp string, parsed by the date formatter when dates are derived.
    At(String),
}

impl RawTimestamp {
    /// True for the [`DRAFT`] marker.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// The raw string form handed to the date formatter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => DRAFT,
            Self::At(value) => value,
        }
    }
}

impl From<String> for RawTimestamp {
    fn from(value: String) -> Self {
        if value == DRAFT { Self::Draft } else { Self::At(value) }
    }
}

impl From<&str> for RawTimestamp {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<RawTimestamp> for String {
    fn from(value: RawTimestamp) -> Self {
        match value {
            RawTimestamp::Draft => DRAFT.to_owned(),
            RawTimestamp::At(value) => value,
        }
    }
}
