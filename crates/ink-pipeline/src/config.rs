//! Processor configuration.
//!
//! The surrounding pipeline parses its configuration file and hands the
//! processor an already-parsed structure; this module only defines the
//! recognized shape. Unknown keys are ignored on deserialization.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Options recognized by [`ItemProcessor`](crate::ItemProcessor).
///
/// `dates` maps format keys (e.g. `"fullDate"`) to pattern strings. Pattern
/// syntax belongs to the configured [`DateFormatter`](crate::DateFormatter);
/// the processor passes patterns through unchanged. A missing `dates`
/// section is equivalent to an empty map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Date format patterns, keyed by format key.
    pub dates: BTreeMap<String, String>,
}

impl ProcessorConfig {
    /// Add a date format entry.
    #[must_use]
    pub fn with_date_format(
        mut self,
        key: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        self.dates.insert(key.into(), pattern.into());
        self
    }
}
