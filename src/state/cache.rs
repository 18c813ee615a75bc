use statsbomb_api::{Competition, Event, Match};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Fetched tables keyed by the arguments that produced them. Entries live for
/// the process lifetime: no invalidation, no TTL, no eviction.
#[derive(Debug)]
pub struct KeyedCache<K, V> {
    entries: HashMap<K, Arc<V>>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for KeyedCache<K, V> {
    fn default() -> Self {
        Self { entries: HashMap::new(), hits: 0, misses: 0 }
    }
}

impl<K: Eq + Hash, V> KeyedCache<K, V> {
    pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(Arc::clone(value))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a freshly fetched value and hand back the shared copy.
    pub fn insert(&mut self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.insert(key, Arc::clone(&value));
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

/// Key for a season's match list: (competition key, season key).
pub type SeasonKey = (u32, u32);

/// The three provider tables, owned by the network worker.
#[derive(Debug, Default)]
pub struct DataCache {
    pub competitions: KeyedCache<(), Vec<Competition>>,
    pub matches: KeyedCache<SeasonKey, Vec<Match>>,
    pub events: KeyedCache<u32, Vec<Event>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lookup_for_same_key_is_a_hit() {
        let mut cache: KeyedCache<SeasonKey, Vec<u32>> = KeyedCache::default();
        assert!(cache.get(&(11, 37)).is_none());
        cache.insert((11, 37), vec![1, 2, 3]);
        let hit = cache.get(&(11, 37)).expect("cached");
        assert_eq!(*hit, vec![1, 2, 3]);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let mut cache: KeyedCache<SeasonKey, &str> = KeyedCache::default();
        cache.insert((11, 37), "2004/2005");
        cache.insert((11, 38), "2005/2006");
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&(37, 11)).is_none());
        assert_eq!(cache.get(&(11, 38)).as_deref(), Some(&"2005/2006"));
    }

    #[test]
    fn insert_returns_the_shared_value() {
        let mut cache: KeyedCache<u32, String> = KeyedCache::default();
        let stored = cache.insert(7, "events".to_string());
        let fetched = cache.get(&7).unwrap();
        assert!(Arc::ptr_eq(&stored, &fetched));
    }
}
