//! Optional memoization of compiled templates, keyed on the markup.

use crate::fill::combined_fill_region;
use crate::path::VectorPath;
use crate::scanner::scan;
use crate::shapes::GeometryElement;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => unreachable!(),
};

/// Least-recently-used cache of geometry lists and fill regions.
///
/// Compilation is pure, so a hit is always identical to recomputing.
#[derive(Debug)]
pub struct GeometryCache {
    elements: LruCache<String, Arc<[GeometryElement]>>,
    regions: LruCache<String, Arc<VectorPath>>,
}

impl Default for GeometryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl GeometryCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            elements: LruCache::new(capacity),
            regions: LruCache::new(capacity),
        }
    }

    /// Capacity from a plain count; zero falls back to the default.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY))
    }

    /// Geometry for `document`, compiled on first use.
    pub fn elements(&mut self, document: &str) -> Arc<[GeometryElement]> {
        if let Some(hit) = self.elements.get(document) {
            return Arc::clone(hit);
        }
        let compiled: Arc<[GeometryElement]> = scan(document).into();
        self.elements.put(document.to_string(), Arc::clone(&compiled));
        compiled
    }

    /// Fill region for `document`, compiled on first use.
    pub fn fill_region(&mut self, document: &str) -> Arc<VectorPath> {
        if let Some(hit) = self.regions.get(document) {
            return Arc::clone(hit);
        }
        let compiled = Arc::new(combined_fill_region(document));
        self.regions.put(document.to_string(), Arc::clone(&compiled));
        compiled
    }

    /// Number of cached geometry lists.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.regions.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.regions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<circle cx="10" cy="10" r="5"/>"#;

    #[test]
    fn test_cache_hit_shares_allocation() {
        let mut cache = GeometryCache::default();
        let a = cache.elements(DOC);
        let b = cache.elements(DOC);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_evicts_least_recent() {
        let mut cache = GeometryCache::with_capacity(1);
        let first = cache.elements(DOC);
        cache.elements("<rect/>");
        let again = cache.elements(DOC);
        assert!(!Arc::ptr_eq(&first, &again));
        assert_eq!(*first, *again);
    }

    #[test]
    fn test_fill_region_cached() {
        let mut cache = GeometryCache::default();
        let a = cache.fill_region(DOC);
        let b = cache.fill_region(DOC);
        assert!(Arc::ptr_eq(&a, &b));
        cache.clear();
        assert!(cache.is_empty());
    }
}
