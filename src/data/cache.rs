//! Memoized dataset access
//!
//! `DatasetCache` is built once at startup and shared through `AppState`.
//! The first `get()` runs the source; every later call returns the same `Arc`.

use std::sync::{Arc, OnceLock};

use super::builtin::{BuiltinDatasets, DatasetSource};
use super::types::Datasets;

/// Compute-once wrapper around a `DatasetSource`
pub struct DatasetCache {
    source: Box<dyn DatasetSource>,
    cell: OnceLock<Arc<Datasets>>,
}

impl DatasetCache {
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cell: OnceLock::new(),
        }
    }

    /// Cache over the built-in tables
    pub fn builtin() -> Self {
        Self::new(BuiltinDatasets)
    }

    /// Get the datasets, loading them on first use
    pub fn get(&self) -> Arc<Datasets> {
        let datasets = self.cell.get_or_init(|| {
            tracing::debug!("Loading dashboard datasets");
            Arc::new(self.source.load())
        });
        Arc::clone(datasets)
    }

    /// Whether the datasets have been loaded yet
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for DatasetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetCache")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl DatasetSource for CountingSource {
        fn load(&self) -> Datasets {
            self.calls.fetch_add(1, Ordering::SeqCst);
            BuiltinDatasets.load()
        }
    }

    fn counting_cache() -> (DatasetCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = DatasetCache::new(CountingSource {
            calls: Arc::clone(&calls),
        });
        (cache, calls)
    }

    #[test]
    fn test_loads_lazily_and_once() {
        let (cache, calls) = counting_cache();
        assert!(!cache.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let first = cache.get();
        let second = cache.get();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_concurrent_access_loads_once() {
        let (cache, calls) = counting_cache();
        let cache = Arc::new(cache);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get())
            })
            .collect();

        let results: Vec<Arc<Datasets>> = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn test_builtin_cache_matches_source() {
        let cache = DatasetCache::builtin();
        assert_eq!(*cache.get(), BuiltinDatasets.load());
    }
}
