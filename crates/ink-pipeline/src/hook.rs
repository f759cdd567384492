//! Per-directory extension hooks.
//!
//! A source directory may carry a custom transformation that runs against
//! every item loaded from it. The embedding pipeline registers hooks
//! during its resolution step; the processor asks a [`HookResolver`] for
//! the directory's hook exactly once per batch and applies it to each item
//! in input order. Hooks may mutate items arbitrarily — the processor does
//! not inspect what they change.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ink_item::Item;

/// Error type for hook resolution and application.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// A hook exists for the directory but could not be produced.
    #[error("failed to load hook for {}: {reason}", dir.display())]
    Load {
        /// Source directory the hook belongs to.
        dir: PathBuf,
        /// Backend-specific failure description.
        reason: String,
    },

    /// A hook invocation failed for an item.
    #[error("hook failed for {path}: {reason}")]
    Apply {
        /// Source path of the item being transformed.
        path: String,
        /// Failure description from the hook.
        reason: String,
    },
}

/// A custom transformation applied to one item.
pub trait ItemHook: Send + Sync {
    /// Transform one item in place.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] if the transformation fails. The processor
    /// propagates the failure without rolling back items transformed
    /// earlier in the batch.
    fn apply(&self, item: &mut Item) -> Result<(), HookError>;
}

impl<F> ItemHook for F
where
    F: Fn(&mut Item) -> Result<(), HookError> + Send + Sync,
{
    fn apply(&self, item: &mut Item) -> Result<(), HookError> {
        self(item)
    }
}

/// Resolves the hook for a source directory, if one exists.
///
/// The existence probe against the environment lives behind this trait;
/// [`ItemProcessor`](crate::ItemProcessor) calls
/// [`resolve`](HookResolver::resolve) exactly once per `process`
/// invocation, never once per item.
pub trait HookResolver: Send + Sync {
    /// Look up the hook for `source_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Load`] if a hook exists but cannot be produced.
    fn resolve(&self, source_dir: &Path) -> Result<Option<Arc<dyn ItemHook>>, HookError>;
}

/// Resolver that never yields a hook.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullResolver;

impl HookResolver for NullResolver {
    fn resolve(&self, _source_dir: &Path) -> Result<Option<Arc<dyn ItemHook>>, HookError> {
        Ok(None)
    }
}

/// Hooks registered per source directory.
///
/// The embedding pipeline's resolution step populates the registry up
/// front; resolving is a plain lookup with no I/O.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: HashMap<PathBuf, Arc<dyn ItemHook>>,
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook for a source directory, replacing any previous one.
    pub fn register(&mut self, source_dir: impl Into<PathBuf>, hook: Arc<dyn ItemHook>) {
        self.hooks.insert(source_dir.into(), hook);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_hook(mut self, source_dir: impl Into<PathBuf>, hook: Arc<dyn ItemHook>) -> Self {
        self.register(source_dir, hook);
        self
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("dirs", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HookResolver for HookRegistry {
    fn resolve(&self, source_dir: &Path) -> Result<Option<Arc<dyn ItemHook>>, HookError> {
        Ok(self.hooks.get(source_dir).cloned())
    }
}

/// Recording resolver for tests.
///
/// Records every probed directory and returns a configured hook, or fails
/// with a configured load error.
#[cfg(any(test, feature = "mock"))]
pub struct MockResolver {
    hook: Option<Arc<dyn ItemHook>>,
    load_failure: Option<String>,
    probed: std::sync::Mutex<Vec<PathBuf>>,
}

#[cfg(any(test, feature = "mock"))]
impl MockResolver {
    /// Resolver that yields no hook.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hook: None,
            load_failure: None,
            probed: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Yield `hook` for every directory.
    #[must_use]
    pub fn with_hook(mut self, hook: Arc<dyn ItemHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Fail every resolution with [`HookError::Load`].
    #[must_use]
    pub fn with_load_failure(mut self, reason: impl Into<String>) -> Self {
        self.load_failure = Some(reason.into());
        self
    }

    /// Directories probed so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn probed(&self) -> Vec<PathBuf> {
        self.probed.lock().unwrap().clone()
    }
}

#[cfg(any(test, feature = "mock"))]
impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "mock"))]
impl HookResolver for MockResolver {
    fn resolve(&self, source_dir: &Path) -> Result<Option<Arc<dyn ItemHook>>, HookError> {
        self.probed.lock().unwrap().push(source_dir.to_path_buf());
        if let Some(reason) = &self.load_failure {
            return Err(HookError::Load {
                dir: source_dir.to_path_buf(),
                reason: reason.clone(),
            });
        }
        Ok(self.hook.clone())
    }
}
