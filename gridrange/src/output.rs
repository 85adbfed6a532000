use alloc::sync::Arc;

use crate::key::KeyMap;
use crate::{CacheKey, CellBox};

/// Rendered outputs that can report the box they were positioned with.
///
/// Hosts lay cells out from that box; an output without one is a renderer bug that the engine
/// reports once per grid in debug builds.
pub trait Positioned {
    fn style(&self) -> Option<&CellBox>;
}

impl Positioned for CellBox {
    fn style(&self) -> Option<&CellBox> {
        Some(self)
    }
}

/// Remembers rendered outputs by key while a scroll gesture is in flight.
///
/// An entry is written once and then handed out verbatim (the same `Arc`) until the cache is
/// cleared, so hosts can skip re-rendering by pointer equality.
pub struct OutputCache<T> {
    entries: KeyMap<Arc<T>>,
}

impl<T> OutputCache<T> {
    pub fn new() -> Self {
        Self {
            entries: KeyMap::default(),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<T>> {
        self.entries.get(key).map(Arc::clone)
    }

    pub fn insert(&mut self, key: CacheKey, output: Arc<T>) {
        self.entries.insert(key, output);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &CacheKey) -> Option<Arc<T>> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached output for `key`, or renders it.
    ///
    /// With `can_cache == false` the cache is neither read nor written. A `None` render result
    /// is never stored.
    pub(crate) fn resolve(
        &mut self,
        key: CacheKey,
        can_cache: bool,
        render: impl FnOnce() -> Option<T>,
    ) -> Option<Arc<T>> {
        if !can_cache {
            return render().map(Arc::new);
        }
        if let Some(hit) = self.entries.get(&key) {
            return Some(Arc::clone(hit));
        }
        let output = Arc::new(render()?);
        self.entries.insert(key, Arc::clone(&output));
        Some(output)
    }
}

impl<T> Default for OutputCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for OutputCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T> core::fmt::Debug for OutputCache<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OutputCache")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

/// One-shot diagnostic for outputs that lack a style.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MissingStyleWarning {
    warned: bool,
}

impl MissingStyleWarning {
    pub(crate) fn warned(&self) -> bool {
        self.warned
    }

    pub(crate) fn reset(&mut self) {
        self.warned = false;
    }

    pub(crate) fn check<C: Positioned>(&mut self, output: &C) {
        if !cfg!(debug_assertions) || self.warned || output.style().is_some() {
            return;
        }
        self.warned = true;
        gwarn!("Rendered cell should include a style for positioning");
    }
}
