//! Item preprocessing for the Ink publishing pipeline.
//!
//! Runs after source loading and before template rendering:
//!
//! - [`sequence::assign_neighbors`] links an ordered batch of items by
//!   assigning `previous`/`next` neighbor indices
//! - [`ItemProcessor`] derives formatted date fields from raw file
//!   timestamps and applies the source directory's hook, if one resolves
//!
//! Both operations mutate the caller's items in place and run
//! synchronously to completion.
//!
//! # Quick Start
//!
//! ```
//! use std::path::Path;
//!
//! use ink_item::{Item, RawTimestamp};
//! use ink_pipeline::{ItemProcessor, ProcessorConfig, sequence};
//!
//! # fn main() -> Result<(), ink_pipeline::ProcessError> {
//! let mut items = vec![Item::new("posts/hello.md"), Item::new("posts/again.md")];
//! items[0].file.created = Some(RawTimestamp::from("2024-05-04T10:30:00+02:00"));
//!
//! let config = ProcessorConfig::default().with_date_format("fullDate", "MMMM Do YYYY");
//! ItemProcessor::new().process(&mut items, Path::new("posts"), &config)?;
//! sequence::assign_neighbors(&mut items);
//!
//! assert!(items[0].dates.contains_key("fullDate"));
//! assert_eq!(items[0].next, Some(1));
//! assert_eq!(items[1].previous, Some(0));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod datefmt;
pub mod hook;
pub mod processor;
pub mod sequence;

pub use config::ProcessorConfig;
pub use datefmt::{DateError, DateFormatter, PatternFormatter};
#[cfg(feature = "mock")]
pub use hook::MockResolver;
pub use hook::{HookError, HookRegistry, HookResolver, ItemHook, NullResolver};
pub use processor::{ItemProcessor, ProcessError};
