//! Hash keys and the insertion-ordered hash value.

use std::hash::Hasher;

use rustc_hash::{FxHashMap, FxHasher};

use super::Value;
use crate::errors::{unusable_as_hash_key, EvalError};

/// Runtime type a [`HashKey`] was computed from. Keeps keys of different
/// types apart even when their hashes coincide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashKeyTag {
    Integer,
    Boolean,
    String,
}

/// Lookup key for hashable values.
///
/// Equal values always produce equal keys. Integers use their two's
/// complement bits, booleans 0 or 1, and strings a content hash.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub tag: HashKeyTag,
    pub hash: u64,
}

impl HashKey {
    pub fn integer(value: i64) -> Self {
        HashKey {
            tag: HashKeyTag::Integer,
            hash: u64::from_ne_bytes(value.to_ne_bytes()),
        }
    }

    pub fn boolean(value: bool) -> Self {
        HashKey {
            tag: HashKeyTag::Boolean,
            hash: u64::from(value),
        }
    }

    pub fn string(value: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write(value.as_bytes());
        HashKey {
            tag: HashKeyTag::String,
            hash: hasher.finish(),
        }
    }
}

/// Contents of a hash value: key/value pairs in insertion order.
///
/// The index maps each [`HashKey`] to the position of the first entry with
/// that key. Lookups confirm the stored key, so two strings whose hashes
/// collide still land in separate entries.
#[derive(Clone, Debug, Default)]
pub struct HashValue {
    entries: Vec<(Value, Value)>,
    index: FxHashMap<HashKey, usize>,
}

impl HashValue {
    pub fn new() -> Self {
        HashValue::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        HashValue {
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert or overwrite. An overwritten entry keeps its original position.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<(), EvalError> {
        let hash_key = key
            .hash_key()
            .ok_or_else(|| unusable_as_hash_key(key.type_name()))?;
        self.insert_keyed(hash_key, key, value);
        Ok(())
    }

    /// Value stored under `key`; `None` when absent or unhashable.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.get_keyed(key.hash_key()?, key)
    }

    /// `hash_key` must be `key_value.hash_key()`.
    pub(crate) fn insert_keyed(&mut self, hash_key: HashKey, key_value: Value, value: Value) {
        debug_assert_eq!(key_value.hash_key(), Some(hash_key));
        if let Some(pos) = self.position(hash_key, &key_value) {
            self.entries[pos].1 = value;
            return;
        }
        self.index.entry(hash_key).or_insert(self.entries.len());
        self.entries.push((key_value, value));
    }

    pub(crate) fn get_keyed(&self, hash_key: HashKey, key_value: &Value) -> Option<&Value> {
        self.position(hash_key, key_value)
            .map(|pos| &self.entries[pos].1)
    }

    fn position(&self, key: HashKey, key_value: &Value) -> Option<usize> {
        let &pos = self.index.get(&key)?;
        if self.entries[pos].0 == *key_value {
            return Some(pos);
        }
        // Hash collision with a different key.
        self.entries.iter().position(|(k, _)| k == key_value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }
}

impl PartialEq for HashValue {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
