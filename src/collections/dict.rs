use std::collections::HashMap;
use std::marker::PhantomData;

use serde::Serialize;

/// Key-value store keyed by structural equality.
///
/// Keys are reduced to their canonical `serde_json` serialization, so two
/// separately constructed but field-equal keys address the same entry. Field
/// order in the serialization follows the key type's declaration order and is
/// therefore stable across instances of the same type.
///
/// Accepted limitations, by design rather than checked at runtime: two
/// distinct keys that happen to serialize identically collide, and a key that
/// fails to serialize maps to a single shared sentinel entry.
#[derive(Debug)]
pub struct StructuralDict<K, V> {
    entries: HashMap<String, V>,
    _key: PhantomData<K>,
}

impl<K: Serialize, V> StructuralDict<K, V> {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            _key: PhantomData,
        }
    }

    fn canonical(key: &K) -> String {
        serde_json::to_string(key).unwrap_or_default()
    }

    /// Insert or replace the value stored under the structural key.
    pub fn insert(&mut self, key: &K, value: V) {
        self.entries.insert(Self::canonical(key), value);
    }

    /// True if a structurally equal key has been inserted.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(&Self::canonical(key))
    }

    /// Remove the entry for the structural key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(&Self::canonical(key))
    }

    /// Value stored under the structural key, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(&Self::canonical(key))
    }

    /// All stored values, in an unspecified but stable-per-call order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Serialize, V> Default for StructuralDict<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct GridKey {
        frame: u32,
        channel: String,
    }

    fn key(frame: u32, channel: &str) -> GridKey {
        GridKey {
            frame,
            channel: channel.to_string(),
        }
    }

    #[test]
    fn structurally_equal_keys_are_identical() {
        let mut dict = StructuralDict::new();
        dict.insert(&key(3, "density"), 42);
        // A third, independently constructed field-equal key still matches.
        assert!(dict.contains(&key(3, "density")));
        assert_eq!(dict.get(&key(3, "density")), Some(&42));
        assert!(!dict.contains(&key(4, "density")));
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut dict = StructuralDict::new();
        dict.insert(&key(1, "a"), "old");
        dict.insert(&key(1, "a"), "new");
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get(&key(1, "a")), Some(&"new"));
    }

    #[test]
    fn remove_deletes_by_structure() {
        let mut dict = StructuralDict::new();
        dict.insert(&key(7, "x"), 1.0);
        assert_eq!(dict.remove(&key(7, "x")), Some(1.0));
        assert!(dict.is_empty());
        assert_eq!(dict.remove(&key(7, "x")), None);
    }

    #[test]
    fn values_returns_all_entries() {
        let mut dict = StructuralDict::new();
        dict.insert(&key(1, "a"), 10);
        dict.insert(&key(2, "b"), 20);
        let mut values: Vec<i32> = dict.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![10, 20]);
    }
}
