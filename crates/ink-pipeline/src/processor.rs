//! Item batch processing.
//!
//! [`ItemProcessor`] derives formatted date fields for every item in a
//! batch and then applies the source directory's hook, if one resolves.
//! Date derivation for the whole batch completes before any hook runs;
//! within the hook pass, items are visited in input order.

use std::path::Path;
use std::sync::Arc;

use ink_item::{FormattedDates, Item, RawTimestamp};

use crate::config::ProcessorConfig;
use crate::datefmt::{DateError, DateFormatter, PatternFormatter};
use crate::hook::{HookError, HookResolver, NullResolver};

/// Error type for batch processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// A raw timestamp could not be formatted.
    #[error("date formatting failed for {path}")]
    Format {
        /// Source path of the item.
        path: String,
        /// Formatter failure.
        #[source]
        source: DateError,
    },

    /// Hook resolution or application failed.
    #[error(transparent)]
    Hook(#[from] HookError),
}

/// Derives date fields and applies directory hooks to item batches.
///
/// Holds the two injected capabilities: a [`DateFormatter`] for pattern
/// rendering and a [`HookResolver`] for locating per-directory hooks.
/// Defaults to [`PatternFormatter`] and [`NullResolver`].
pub struct ItemProcessor {
    formatter: Arc<dyn DateFormatter>,
    resolver: Arc<dyn HookResolver>,
}

impl Default for ItemProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemProcessor {
    /// Processor with the default [`PatternFormatter`] and no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatter: Arc::new(PatternFormatter::new()),
            resolver: Arc::new(NullResolver),
        }
    }

    /// Replace the date formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn DateFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replace the hook resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn HookResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Process a batch of items loaded from `source_dir`.
    ///
    /// Derives formatted dates for every item and every configured format
    /// key, then resolves the directory hook exactly once and applies it
    /// to each item in input order. Items are mutated in place; no new
    /// items are created.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError`] if a timestamp cannot be formatted or a
    /// hook fails to resolve or apply. Failures propagate immediately;
    /// items mutated before the failure keep their mutations.
    pub fn process(
        &self,
        items: &mut [Item],
        source_dir: &Path,
        config: &ProcessorConfig,
    ) -> Result<(), ProcessError> {
        tracing::debug!(
            item_count = items.len(),
            format_keys = config.dates.len(),
            "Deriving date fields"
        );
        for item in items.iter_mut() {
            self.derive_dates(item, config)?;
        }

        let hook = self.resolver.resolve(source_dir)?;
        if let Some(hook) = hook {
            tracing::debug!(dir = %source_dir.display(), "Applying directory hook");
            for item in items.iter_mut() {
                hook.apply(item)?;
            }
        }

        Ok(())
    }

    /// Derive `dates` entries for one item.
    ///
    /// A draft `created` timestamp forces the `DRAFT` marker on all three
    /// fields for every format key, whatever `modified`/`rendered` hold.
    /// Otherwise fields format independently; a format key whose record
    /// would be entirely empty is not inserted at all.
    fn derive_dates(&self, item: &mut Item, config: &ProcessorConfig) -> Result<(), ProcessError> {
        let draft = item
            .file
            .created
            .as_ref()
            .is_some_and(RawTimestamp::is_draft);

        for (key, pattern) in &config.dates {
            let formatted = if draft {
                FormattedDates::draft()
            } else {
                FormattedDates {
                    created: self.format_field(item.file.created.as_ref(), pattern, &item.file.path)?,
                    modified: self.format_field(item.file.modified.as_ref(), pattern, &item.file.path)?,
                    rendered: self.format_field(item.file.rendered.as_ref(), pattern, &item.file.path)?,
                }
            };
            if !formatted.is_empty() {
                item.dates.insert(key.clone(), formatted);
            }
        }

        Ok(())
    }

    fn format_field(
        &self,
        raw: Option<&RawTimestamp>,
        pattern: &str,
        path: &str,
    ) -> Result<Option<String>, ProcessError> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        self.formatter
            .format(raw.as_str(), pattern)
            .map(Some)
            .map_err(|source| ProcessError::Format {
                path: path.to_owned(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::ItemProcessor: Send, Sync);

    use std::path::PathBuf;
    use std::sync::Mutex;

    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    use crate::hook::{ItemHook, MockResolver};

    use super::*;

    fn make_processor() -> ItemProcessor {
        let offset = FixedOffset::east_opt(3600).unwrap();
        ItemProcessor::new().with_formatter(Arc::new(PatternFormatter::with_fixed_offset(offset)))
    }

    fn date_config() -> ProcessorConfig {
        ProcessorConfig::default()
            .with_date_format("fullDate", "MMMM Do YYYY")
            .with_date_format("someTime", "HH:mm:ss")
    }

    fn marker_hook() -> Arc<dyn ItemHook> {
        Arc::new(|item: &mut Item| -> Result<(), HookError> {
            item.vars.insert("i_was_here".to_owned(), serde_json::json!(true));
            Ok(())
        })
    }

    #[test]
    fn test_adds_formatted_timestamps_for_file_timestamps() {
        let mut item = Item::new("posts/hello.md");
        item.file.created = Some(RawTimestamp::from("1970-01-01T01:00:00+01:00"));
        item.file.modified = Some(RawTimestamp::from("1970-01-02T02:00:00+01:00"));
        item.file.rendered = Some(RawTimestamp::from("1970-01-03T03:00:00+01:00"));
        let mut items = vec![item];

        make_processor()
            .process(&mut items, Path::new("posts"), &date_config())
            .unwrap();

        let full = &items[0].dates["fullDate"];
        assert_eq!(full.created.as_deref(), Some("January 1st 1970"));
        assert_eq!(full.modified.as_deref(), Some("January 2nd 1970"));
        assert_eq!(full.rendered.as_deref(), Some("January 3rd 1970"));

        let time = &items[0].dates["someTime"];
        assert_eq!(time.created.as_deref(), Some("01:00:00"));
        assert_eq!(time.modified.as_deref(), Some("02:00:00"));
        assert_eq!(time.rendered.as_deref(), Some("03:00:00"));
    }

    #[test]
    fn test_draft_forces_draft_on_every_field() {
        let mut item = Item::new("posts/wip.md");
        item.file.created = Some(RawTimestamp::Draft);
        // Real timestamps on the other fields do not matter once created
        // is a draft.
        item.file.modified = Some(RawTimestamp::from("1970-01-02T02:00:00+01:00"));
        let mut items = vec![item];

        make_processor()
            .process(&mut items, Path::new("posts"), &date_config())
            .unwrap();

        for key in ["fullDate", "someTime"] {
            let dates = &items[0].dates[key];
            assert_eq!(dates.created.as_deref(), Some("DRAFT"), "key: {key}");
            assert_eq!(dates.modified.as_deref(), Some("DRAFT"), "key: {key}");
            assert_eq!(dates.rendered.as_deref(), Some("DRAFT"), "key: {key}");
        }
    }

    #[test]
    fn test_absent_timestamps_produce_no_entry() {
        let mut items = vec![Item::new("posts/bare.md")];

        make_processor()
            .process(
                &mut items,
                Path::new("posts"),
                &ProcessorConfig::default().with_date_format("someTime", "HH:mm:ss"),
            )
            .unwrap();

        assert!(!items[0].dates.contains_key("someTime"));
        assert!(items[0].dates.is_empty());
    }

    #[test]
    fn test_partial_timestamps_omit_absent_fields() {
        let mut item = Item::new("posts/partial.md");
        item.file.modified = Some(RawTimestamp::from("1970-01-02T02:00:00+01:00"));
        let mut items = vec![item];

        make_processor()
            .process(
                &mut items,
                Path::new("posts"),
                &ProcessorConfig::default().with_date_format("someTime", "HH:mm:ss"),
            )
            .unwrap();

        let time = &items[0].dates["someTime"];
        assert_eq!(time.created, None);
        assert_eq!(time.modified.as_deref(), Some("02:00:00"));
        assert_eq!(time.rendered, None);
    }

    #[test]
    fn test_empty_config_derives_nothing() {
        let mut item = Item::new("posts/hello.md");
        item.file.created = Some(RawTimestamp::from("1970-01-01T01:00:00+01:00"));
        let mut items = vec![item];

        make_processor()
            .process(&mut items, Path::new("posts"), &ProcessorConfig::default())
            .unwrap();

        assert!(items[0].dates.is_empty());
    }

    #[test]
    fn test_draft_in_modified_position_is_unparseable() {
        let mut item = Item::new("posts/odd.md");
        item.file.created = Some(RawTimestamp::from("1970-01-01T01:00:00+01:00"));
        item.file.modified = Some(RawTimestamp::Draft);
        let mut items = vec![item];

        let err = make_processor()
            .process(&mut items, Path::new("posts"), &date_config())
            .unwrap_err();

        assert!(matches!(err, ProcessError::Format { .. }));
    }

    #[test]
    fn test_empty_batch_probes_resolver_once() {
        let resolver = Arc::new(MockResolver::new());
        let processor = make_processor().with_resolver(Arc::<MockResolver>::clone(&resolver));

        processor
            .process(&mut [], Path::new("some/path"), &ProcessorConfig::default())
            .unwrap();

        assert_eq!(resolver.probed(), vec![PathBuf::from("some/path")]);
    }

    #[test]
    fn test_hook_applied_to_every_item_with_one_probe() {
        let resolver = Arc::new(MockResolver::new().with_hook(marker_hook()));
        let processor = make_processor().with_resolver(Arc::<MockResolver>::clone(&resolver));
        let mut items = vec![
            Item::new("posts/a.md"),
            Item::new("posts/b.md"),
            Item::new("posts/c.md"),
        ];

        processor
            .process(&mut items, Path::new("posts"), &ProcessorConfig::default())
            .unwrap();

        for item in &items {
            assert_eq!(item.vars["i_was_here"], serde_json::json!(true));
        }
        assert_eq!(resolver.probed().len(), 1);
    }

    #[test]
    fn test_hook_sees_items_in_input_order_after_dates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_hook = Arc::clone(&seen);
        let hook: Arc<dyn ItemHook> = Arc::new(move |item: &mut Item| -> Result<(), HookError> {
            // Date derivation for the whole batch happens before any hook
            // runs, so every item already carries its entry.
            assert!(item.dates.contains_key("someTime"));
            seen_by_hook.lock().unwrap().push(item.file.path.clone());
            Ok(())
        });
        let resolver = Arc::new(MockResolver::new().with_hook(hook));
        let processor = make_processor().with_resolver(Arc::<MockResolver>::clone(&resolver));

        let mut items: Vec<Item> = ["b", "a", "c"]
            .into_iter()
            .map(|name| {
                let mut item = Item::new(format!("posts/{name}.md"));
                item.file.created = Some(RawTimestamp::from("1970-01-01T01:00:00+01:00"));
                item
            })
            .collect();

        processor
            .process(
                &mut items,
                Path::new("posts"),
                &ProcessorConfig::default().with_date_format("someTime", "HH:mm:ss"),
            )
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["posts/b.md", "posts/a.md", "posts/c.md"]
        );
    }

    #[test]
    fn test_load_failure_propagates_after_dates_derived() {
        let resolver = Arc::new(MockResolver::new().with_load_failure("bad hook"));
        let processor = make_processor().with_resolver(Arc::<MockResolver>::clone(&resolver));
        let mut item = Item::new("posts/hello.md");
        item.file.created = Some(RawTimestamp::from("1970-01-01T01:00:00+01:00"));
        let mut items = vec![item];

        let err = processor
            .process(&mut items, Path::new("posts"), &date_config())
            .unwrap_err();

        assert!(matches!(err, ProcessError::Hook(HookError::Load { .. })));
        // Step 1 mutations stay in place.
        assert!(items[0].dates.contains_key("fullDate"));
    }

    #[test]
    fn test_apply_failure_keeps_earlier_mutations() {
        let hook: Arc<dyn ItemHook> = Arc::new(|item: &mut Item| -> Result<(), HookError> {
            if item.file.path.ends_with("bad.md") {
                return Err(HookError::Apply {
                    path: item.file.path.clone(),
                    reason: "boom".to_owned(),
                });
            }
            item.vars.insert("i_was_here".to_owned(), serde_json::json!(true));
            Ok(())
        });
        let resolver = Arc::new(MockResolver::new().with_hook(hook));
        let processor = make_processor().with_resolver(Arc::<MockResolver>::clone(&resolver));
        let mut items = vec![
            Item::new("posts/good.md"),
            Item::new("posts/bad.md"),
            Item::new("posts/unreached.md"),
        ];

        let err = processor
            .process(&mut items, Path::new("posts"), &ProcessorConfig::default())
            .unwrap_err();

        assert!(matches!(err, ProcessError::Hook(HookError::Apply { .. })));
        assert_eq!(items[0].vars["i_was_here"], serde_json::json!(true));
        assert!(!items[1].vars.contains_key("i_was_here"));
        assert!(!items[2].vars.contains_key("i_was_here"));
    }

    #[test]
    fn test_default_processor_has_no_hooks() {
        let mut items = vec![Item::new("posts/hello.md")];

        ItemProcessor::default()
            .process(&mut items, Path::new("posts"), &ProcessorConfig::default())
            .unwrap();

        assert!(items[0].vars.is_empty());
    }
}
