//! Identity Resolution
//!
//! Source identifiers are not guaranteed to be unique. When a row declares an id that is
//! already taken, the next free integer above it is used instead.

use super::types::BookKey;
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;

/// Anything that can answer "is this key already assigned?".
pub trait KeySpace {
    fn contains_key(&self, key: BookKey) -> bool;
}

impl<S: BuildHasher> KeySpace for HashSet<BookKey, S> {
    fn contains_key(&self, key: BookKey) -> bool {
        self.contains(&key)
    }
}

impl KeySpace for BTreeSet<BookKey> {
    fn contains_key(&self, key: BookKey) -> bool {
        self.contains(&key)
    }
}

impl<V, S: BuildHasher> KeySpace for HashMap<BookKey, V, S> {
    fn contains_key(&self, key: BookKey) -> bool {
        HashMap::contains_key(self, &key)
    }
}

impl<V> KeySpace for BTreeMap<BookKey, V> {
    fn contains_key(&self, key: BookKey) -> bool {
        BTreeMap::contains_key(self, &key)
    }
}

impl<V, S: BuildHasher> KeySpace for IndexMap<BookKey, V, S> {
    fn contains_key(&self, key: BookKey) -> bool {
        IndexMap::contains_key(self, &key)
    }
}

/// Returns `candidate` if it is free, otherwise the smallest free key above it.
///
/// The search moves upward one step at a time. Past `BookKey::MAX` it continues from
/// `BookKey::MIN`. The function does not insert anything; the caller owns the key set.
pub fn resolve<K: KeySpace + ?Sized>(candidate: BookKey, existing: &K) -> BookKey {
    let mut key = candidate;
    while existing.contains_key(key) {
        key = key.checked_add(1).unwrap_or(BookKey::MIN);
    }
    if key != candidate {
        tracing::debug!("Key {} already taken, resolved to {}", candidate, key);
    }
    key
}
