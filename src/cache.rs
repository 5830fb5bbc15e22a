use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::{
    bfs::SearchLimits,
    graph::NodeIdx,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PathKey {
    start: NodeIdx,
    end: NodeIdx,
    max_path_len: usize,
    max_visits: Option<usize>,
}

/// Memo of search results for one graph. Keys carry node indices only, so a
/// cache must never be shared between graphs; [`crate::PathReasoner`] owns its
/// cache for that reason. Results of deadline-bounded searches depend on timing
/// and are never stored.
#[derive(Default)]
pub struct PathCache {
    inner: RwLock<AHashMap<PathKey, Vec<NodeIdx>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, start: NodeIdx, end: NodeIdx, limits: &SearchLimits) -> Option<Vec<NodeIdx>> {
        let key = key_for(start, end, limits)?;
        let found = self.inner.read().get(&key).cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn insert(&self, start: NodeIdx, end: NodeIdx, limits: &SearchLimits, path: Vec<NodeIdx>) {
        if let Some(key) = key_for(start, end, limits) {
            self.inner.write().insert(key, path);
        }
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.inner.read().len(),
        }
    }
}

fn key_for(start: NodeIdx, end: NodeIdx, limits: &SearchLimits) -> Option<PathKey> {
    if limits.deadline.is_some() {
        return None;
    }
    Some(PathKey {
        start,
        end,
        max_path_len: limits.max_path_len,
        max_visits: limits.max_visits,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_hits_misses_and_clear() {
        let cache = PathCache::new();
        let limits = SearchLimits::with_max_path_len(2);
        assert!(cache.get(0, 1, &limits).is_none());
        cache.insert(0, 1, &limits, vec![0, 1]);
        assert_eq!(cache.get(0, 1, &limits), Some(vec![0, 1]));
        assert!(cache.get(0, 1, &SearchLimits::with_max_path_len(3)).is_none());
        cache.clear();
        assert!(cache.get(0, 1, &limits).is_none());
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 3,
                entries: 0,
            }
        );
    }

    #[test]
    fn test_deadline_results_not_stored() {
        let cache = PathCache::new();
        let limits = SearchLimits {
            deadline: Some(Duration::from_millis(5)),
            ..SearchLimits::default()
        };
        cache.insert(0, 1, &limits, vec![0, 1]);
        assert_eq!(cache.stats().entries, 0);
        assert!(cache.get(0, 1, &limits).is_none());
    }
}
