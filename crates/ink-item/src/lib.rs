//! Content item model for the Ink publishing pipeline.
//!
//! An [`Item`] is one content unit (a post) being prepared for rendering.
//! Items are created by the source-loading stage and mutated in place by the
//! preprocessing pipeline, which:
//!
//! - links items into a sequence via `previous`/`next` neighbor indices
//! - derives formatted date strings from the raw [`FileInfo`] timestamps
//! - lets per-directory hooks attach custom fields through [`Item::vars`]
//!
//! Raw timestamps are modeled as [`RawTimestamp`] so the [`DRAFT`] marker
//! for unpublished content is a variant rather than a magic string.

mod item;
mod timestamp;

pub use item::{FileInfo, FormattedDates, Item};
pub use timestamp::{DRAFT, RawTimestamp};
