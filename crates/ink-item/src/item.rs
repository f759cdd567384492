//! The content item record and its sub-records.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::timestamp::{DRAFT, RawTimestamp};

/// File metadata recorded for an item by the source-loading stage.
///
/// Timestamp fields are optional; an absent field stays absent through
/// serialization and produces no derived date for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    /// Source path of the item, relative to the content root.
    pub path: String,

    /// When the item was first published, or [`RawTimestamp::Draft`] for
    /// unpublished content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<RawTimestamp>,

    /// When the source file last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<RawTimestamp>,

    /// When the item was last rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<RawTimestamp>,
}

/// Formatted date strings derived for one format key.
///
/// A field is `None` when the corresponding raw timestamp is absent, and
/// absent fields are omitted from serialized output entirely rather than
/// appearing as null-valued keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattedDates {
    /// Formatted creation date, or the `DRAFT` marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Formatted modification date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,

    /// Formatted render date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
}

impl FormattedDates {
    /// All three fields set to the [`DRAFT`] marker.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            created: Some(DRAFT.to_owned()),
            modified: Some(DRAFT.to_owned()),
            rendered: Some(DRAFT.to_owned()),
        }
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_none() && self.modified.is_none() && self.rendered.is_none()
    }
}

/// One content unit being prepared for rendering.
///
/// Items are created and owned by the source-loading stage. The
/// preprocessing pipeline mutates fields in place; it never creates or
/// destroys items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Raw file metadata.
    pub file: FileInfo,

    /// Formatted dates, keyed by format key from the processor configuration.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dates: BTreeMap<String, FormattedDates>,

    /// Index of the preceding item in the sequence, or `None` for the first.
    ///
    /// Neighbor links are positional relations into the backing sequence,
    /// not an ownership graph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<usize>,

    /// Index of the following item, or `None` for the last.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<usize>,

    /// Open-ended item variables. Directory hooks attach custom fields here
    /// for templates to consume.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub vars: HashMap<String, serde_json::Value>,
}

impl Item {
    /// Create an item for a source path with no timestamps.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            file: FileInfo {
                path: path.into(),
                ..FileInfo::default()
            },
            ..Self::default()
        }
    }
}
