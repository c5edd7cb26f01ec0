use super::loader::TileImage;
use crate::core::{config::EvictionPolicy, geo::TileCoord};
use fxhash::FxHashMap;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Load state of a cached tile
#[derive(Debug, Clone, PartialEq)]
pub enum TileState {
    /// Requested, no answer yet
    Loading,
    Ready(TileImage),
    /// The request or decode failed; the tile stays blank for good
    Failed,
}

impl TileState {
    /// The bitmap to draw, if there is one with a nonzero size
    pub fn image(&self) -> Option<&TileImage> {
        match self {
            TileState::Ready(image) if image.is_drawable() => Some(image),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TileState::Loading)
    }
}

enum Store {
    Flush {
        tiles: FxHashMap<TileCoord, TileState>,
        threshold: usize,
    },
    Lru(LruCache<TileCoord, TileState>),
}

/// In-memory tile cache keyed by tile address.
///
/// An entry is stored the moment a tile is requested, so repeated lookups for
/// a tile that is still loading never issue a second fetch.
pub struct TileCache {
    store: Store,
}

impl TileCache {
    pub fn new(policy: EvictionPolicy) -> Self {
        let store = match policy {
            EvictionPolicy::FlushAbove { threshold } => Store::Flush {
                tiles: FxHashMap::default(),
                threshold,
            },
            EvictionPolicy::Lru { capacity } => {
                let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
                Store::Lru(LruCache::new(capacity))
            }
        };
        Self { store }
    }

    /// Returns the cached state, or stores `Loading` and calls `request` on a miss.
    pub fn get_or_request<F>(&mut self, coord: TileCoord, request: F) -> TileState
    where
        F: FnOnce(TileCoord),
    {
        if let Some(state) = self.get(&coord) {
            return state.clone();
        }

        self.insert(coord, TileState::Loading);
        request(coord);
        TileState::Loading
    }

    /// Get a tile from the cache
    pub fn get(&mut self, coord: &TileCoord) -> Option<&TileState> {
        match &mut self.store {
            Store::Flush { tiles, .. } => tiles.get(coord),
            Store::Lru(cache) => cache.get(coord),
        }
    }

    fn insert(&mut self, coord: TileCoord, state: TileState) {
        match &mut self.store {
            Store::Flush { tiles, .. } => {
                tiles.insert(coord, state);
            }
            Store::Lru(cache) => {
                cache.put(coord, state);
            }
        }
    }

    /// Records the outcome of a load. Returns false when the entry has been
    /// evicted in the meantime, in which case the result is dropped.
    pub fn complete(&mut self, coord: TileCoord, image: Option<TileImage>) -> bool {
        let state = match &mut self.store {
            Store::Flush { tiles, .. } => tiles.get_mut(&coord),
            Store::Lru(cache) => cache.peek_mut(&coord),
        };

        match state {
            Some(state) => {
                *state = image.map_or(TileState::Failed, TileState::Ready);
                true
            }
            None => false,
        }
    }

    /// Makes room for `visible` tiles at once, so one frame never evicts a
    /// tile it has just requested. Only an LRU store has a hard capacity to grow.
    pub fn reserve(&mut self, visible: usize) {
        if let Store::Lru(cache) = &mut self.store {
            if let Some(needed) = NonZeroUsize::new(visible) {
                if cache.cap() < needed {
                    log::info!("growing LRU tile cache from {} to {} entries", cache.cap(), needed);
                    cache.resize(needed);
                }
            }
        }
    }

    /// Upper bound on entries, if the policy has one
    pub fn capacity(&self) -> Option<usize> {
        match &self.store {
            Store::Flush { .. } => None,
            Store::Lru(cache) => Some(cache.cap().get()),
        }
    }

    /// Check if a tile is in the cache
    pub fn contains(&self, coord: &TileCoord) -> bool {
        match &self.store {
            Store::Flush { tiles, .. } => tiles.contains_key(coord),
            Store::Lru(cache) => cache.contains(coord),
        }
    }

    /// Applies the eviction policy for a zoom change. Returns true if the cache was flushed.
    pub fn on_zoom_change(&mut self) -> bool {
        match &mut self.store {
            Store::Flush { tiles, threshold } if tiles.len() > *threshold => {
                log::info!("flushing tile cache ({} entries)", tiles.len());
                tiles.clear();
                true
            }
            _ => false,
        }
    }

    /// Clear all tiles from the cache
    pub fn clear(&mut self) {
        match &mut self.store {
            Store::Flush { tiles, .. } => tiles.clear(),
            Store::Lru(cache) => cache.clear(),
        }
    }

    /// Get the current number of cached tiles
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Flush { tiles, .. } => tiles.len(),
            Store::Lru(cache) => cache.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tiles still waiting on the network
    pub fn pending(&self) -> usize {
        match &self.store {
            Store::Flush { tiles, .. } => tiles.values().filter(|s| s.is_loading()).count(),
            Store::Lru(cache) => cache.iter().filter(|(_, s)| s.is_loading()).count(),
        }
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(EvictionPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn image() -> TileImage {
        TileImage {
            width: 1,
            height: 1,
            rgba: Arc::new(vec![0, 0, 0, 255]),
        }
    }

    #[test]
    fn test_miss_requests_once() {
        let mut cache = TileCache::default();
        let coord = TileCoord::new(1, 2, 3);
        let mut requested = Vec::new();

        let first = cache.get_or_request(coord, |c| requested.push(c));
        let second = cache.get_or_request(coord, |c| requested.push(c));

        assert_eq!(first, TileState::Loading);
        assert_eq!(second, TileState::Loading);
        assert_eq!(requested, vec![coord]);
        assert_eq!(cache.pending(), 1);
    }

    #[test]
    fn test_complete_updates_state() {
        let mut cache = TileCache::default();
        let ok = TileCoord::new(0, 0, 3);
        let bad = TileCoord::new(1, 0, 3);
        cache.get_or_request(ok, |_| {});
        cache.get_or_request(bad, |_| {});

        assert!(cache.complete(ok, Some(image())));
        assert!(cache.complete(bad, None));

        assert!(cache.get(&ok).unwrap().image().is_some());
        assert_eq!(cache.get(&bad), Some(&TileState::Failed));
        assert_eq!(cache.pending(), 0);
    }

    #[test]
    fn test_complete_after_clear_is_dropped() {
        let mut cache = TileCache::default();
        let coord = TileCoord::new(0, 0, 3);
        cache.get_or_request(coord, |_| {});
        cache.clear();

        assert!(!cache.complete(coord, Some(image())));
        assert!(!cache.contains(&coord));
    }

    #[test]
    fn test_zero_sized_image_is_not_drawable() {
        let state = TileState::Ready(TileImage {
            width: 0,
            height: 0,
            rgba: Arc::new(Vec::new()),
        });
        assert!(state.image().is_none());
    }

    #[test]
    fn test_flush_only_above_threshold() {
        let mut cache = TileCache::new(EvictionPolicy::FlushAbove { threshold: 3 });
        for x in 0..3 {
            cache.get_or_request(TileCoord::new(x, 0, 5), |_| {});
        }
        assert!(!cache.on_zoom_change());
        assert_eq!(cache.len(), 3);

        cache.get_or_request(TileCoord::new(3, 0, 5), |_| {});
        assert!(cache.on_zoom_change());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = TileCache::new(EvictionPolicy::Lru { capacity: 2 });
        let coord1 = TileCoord::new(1, 1, 4);
        let coord2 = TileCoord::new(2, 2, 4);
        let coord3 = TileCoord::new(3, 3, 4);

        cache.get_or_request(coord1, |_| {});
        cache.get_or_request(coord2, |_| {});
        // Touch coord1 so coord2 becomes the oldest
        cache.get_or_request(coord1, |_| {});
        cache.get_or_request(coord3, |_| {});

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&coord1));
        assert!(!cache.contains(&coord2));
        assert!(cache.contains(&coord3));
        assert!(!cache.on_zoom_change());
    }

    #[test]
    fn test_reserve_grows_small_lru() {
        let mut cache = TileCache::new(EvictionPolicy::Lru { capacity: 2 });
        cache.reserve(5);
        assert_eq!(cache.capacity(), Some(5));

        for x in 0..5 {
            cache.get_or_request(TileCoord::new(x, 0, 4), |_| {});
        }
        assert_eq!(cache.len(), 5);

        // Never shrinks
        cache.reserve(3);
        assert_eq!(cache.capacity(), Some(5));
    }

    #[test]
    fn test_reserve_leaves_flush_store_alone() {
        let mut cache = TileCache::default();
        cache.reserve(50);
        assert_eq!(cache.capacity(), None);
    }
}
