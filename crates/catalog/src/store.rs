//! Keyed entity storage abstractions for the catalog.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

/// Key/value store abstraction behind the catalog services.
pub trait EntityStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn upsert(&self, key: K, value: V);
    fn list(&self) -> Vec<V>;
    /// Remove a record, returning it when it was present.
    fn remove(&self, key: &K) -> Option<V>;
}

impl<K, V, S> EntityStore<K, V> for Arc<S>
where
    S: EntityStore<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) {
        (**self).upsert(key, value)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }

    fn remove(&self, key: &K) -> Option<V> {
        (**self).remove(key)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryEntityStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryEntityStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryEntityStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EntityStore<K, V> for InMemoryEntityStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn upsert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    fn list(&self) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        map.values().cloned().collect()
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        map.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_then_get_round_trips() {
        let store: InMemoryEntityStore<i64, String> = InMemoryEntityStore::new();
        store.upsert(1, "a".to_string());
        assert_eq!(store.get(&1), Some("a".to_string()));
        assert_eq!(store.get(&2), None);
    }

    #[test]
    fn remove_returns_the_removed_value() {
        let store: InMemoryEntityStore<i64, String> = InMemoryEntityStore::new();
        store.upsert(1, "a".to_string());
        assert_eq!(store.remove(&1), Some("a".to_string()));
        assert_eq!(store.remove(&1), None);
        assert!(store.list().is_empty());
    }
}
