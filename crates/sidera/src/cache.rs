//! Caller-owned caches.
//!
//! Nothing in the engine keeps process-wide state. A caller that wants to
//! reuse chart lookups or ephemeris samples across queries creates one of
//! these, hands a reference to the engine and decides when to clear it.
//! Interior locking lets a single cache be shared by several workers.

use crate::bodies::Body;
use crate::natal::NatalPlacement;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

/// A keyed cache with an explicit insert / lookup / remove / clear contract.
#[derive(Debug)]
pub struct KeyedCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for KeyedCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> KeyedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value)
    }

    pub fn lookup(&self, key: &K) -> Option<V> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached value or compute, store and return it.
    ///
    /// Errors from `compute` are passed through and nothing is stored.
    pub fn get_or_try_insert_with<E, F>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.lookup(&key) {
            return Ok(hit);
        }
        let value = compute()?;
        self.insert(key, value.clone());
        Ok(value)
    }
}

/// Natal placements keyed by chart id
pub type ChartCache = KeyedCache<String, Vec<NatalPlacement>>;

/// Ecliptic longitude samples keyed by body and unix second
pub type SampleCache = KeyedCache<(Body, i64), f64>;
