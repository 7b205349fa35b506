//! LinkedHashTable: the generation list and the public operations.

use crate::error::{check_arg, TableError};
use crate::generation::{Arena, Generation};
use core::fmt;
use slotmap::DefaultKey;

/// Bucket count of the first generation.
pub const INITIAL_BUCKETS: usize = 8;

/// Average chain length of the newest generation above which a new
/// generation is linked.
pub const MAX_CHAIN_LENGTH: f64 = 3.0;

/// String-keyed chained hash table that grows by appending generations.
///
/// Each generation is a fixed array of bucket chains with twice the buckets
/// of the one before it. New keys always land in the newest generation;
/// entries already stored are updated where they are and never moved.
#[derive(Clone)]
pub struct LinkedHashTable {
    entries: Arena,
    generations: Vec<Generation>, // oldest first; never empty
}

/// Snapshot of one generation's size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GenerationStats {
    /// Length of the generation's bucket array.
    pub bucket_count: usize,
    /// Keys stored in this generation only.
    pub key_count: usize,
}

impl GenerationStats {
    /// Keys per bucket; expansion compares this against [`MAX_CHAIN_LENGTH`].
    pub fn load_factor(&self) -> f64 {
        self.key_count as f64 / self.bucket_count as f64
    }
}

impl LinkedHashTable {
    pub fn new() -> Self {
        Self {
            entries: Arena::new(),
            generations: vec![Generation::with_buckets(INITIAL_BUCKETS)],
        }
    }

    /// Drop every entry and every expansion generation, returning to the
    /// freshly created state.
    pub fn reset(&mut self) {
        tracing::debug!(
            generations = self.generations.len(),
            keys = self.entries.len(),
            "resetting table"
        );
        self.entries.clear();
        self.generations.clear();
        self.generations.push(Generation::with_buckets(INITIAL_BUCKETS));
    }

    /// Release the table and everything it owns.
    pub fn destroy(self) {
        tracing::debug!(
            generations = self.generations.len(),
            keys = self.entries.len(),
            "destroying table"
        );
        drop(self);
    }

    // Generation index and slot of `key`, searching oldest to newest.
    fn locate(&self, key: &str) -> Option<(usize, DefaultKey)> {
        self.generations
            .iter()
            .enumerate()
            .find_map(|(i, g)| g.find(&self.entries, key).map(|slot| (i, slot)))
    }

    /// Insert `key` with `value`, or replace the value of an existing key in
    /// whichever generation holds it.
    ///
    /// New keys go to the tail of their chain in the newest generation. If
    /// that pushes the newest generation's load factor above
    /// [`MAX_CHAIN_LENGTH`], a generation with twice the buckets is linked.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<(), TableError> {
        check_arg("key", key)?;
        check_arg("value", value)?;

        if let Some((_, slot)) = self.locate(key) {
            let entry = &mut self.entries[slot];
            entry.value.clear();
            entry.value.push_str(value);
            return Ok(());
        }

        let newest = self.generations.len() - 1;
        self.generations[newest].append(&mut self.entries, key.to_owned(), value.to_owned());
        tracing::trace!(key, generation = newest, "appended new key");

        let target = &self.generations[newest];
        if target.load_factor() > MAX_CHAIN_LENGTH {
            let next = target.grown();
            tracing::debug!(
                keys = target.key_count(),
                buckets = target.bucket_count(),
                new_buckets = next.bucket_count(),
                generation = newest + 1,
                "linking expansion generation"
            );
            self.generations.push(next);
        }
        Ok(())
    }

    /// Owned copy of the value stored for `key`.
    pub fn search(&self, key: &str) -> Result<String, TableError> {
        check_arg("key", key)?;
        self.locate(key)
            .map(|(_, slot)| self.entries[slot].value.clone())
            .ok_or(TableError::NotFound)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Remove `key` from whichever generation holds it.
    pub fn delete(&mut self, key: &str) -> Result<(), TableError> {
        check_arg("key", key)?;
        let Self {
            entries,
            generations,
        } = self;
        generations
            .iter_mut()
            .find_map(|g| g.unlink(entries, key))
            .map(|_| ())
            .ok_or(TableError::NotFound)
    }

    /// Keys stored across all generations.
    pub fn key_count(&self) -> usize {
        self.generations.iter().map(Generation::key_count).sum()
    }

    /// Buckets across all generations.
    pub fn bucket_count(&self) -> usize {
        self.generations.iter().map(Generation::bucket_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.key_count() == 0
    }

    pub fn generation_count(&self) -> usize {
        self.generations.len()
    }

    /// Per-generation sizes, oldest first.
    pub fn generations(&self) -> impl Iterator<Item = GenerationStats> + '_ {
        self.generations.iter().map(|g| GenerationStats {
            bucket_count: g.bucket_count(),
            key_count: g.key_count(),
        })
    }

    /// All keys in ascending byte-lexicographic order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.iter().map(|(k, _)| k.to_owned()).collect();
        keys.sort_unstable();
        keys
    }

    /// Values aligned with [`keys`](Self::keys): `values()[i]` is the value
    /// of `keys()[i]`, found by searching the table for each sorted key.
    pub fn values(&self) -> Vec<String> {
        self.keys()
            .iter()
            .map(|k| match self.search(k) {
                Ok(v) => v,
                Err(e) => unreachable!("enumerated key {k:?} did not resolve: {e}"),
            })
            .collect()
    }

    /// Entries in storage order: generation, then bucket, then chain position.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entries: &self.entries,
            generations: self.generations.iter(),
            heads: Default::default(),
            cur: None,
        }
    }

    /// Structural checks used by the property tests: one generation per
    /// key, doubling bucket counts, counters matching the arena, and a
    /// newest generation at or below the expansion threshold.
    #[cfg(test)]
    pub(crate) fn check_structure(&self) -> Result<(), String> {
        if self.generations.is_empty() {
            return Err("no generations".into());
        }
        if self.generations[0].bucket_count() != INITIAL_BUCKETS {
            return Err("first generation has wrong bucket count".into());
        }
        for w in self.generations.windows(2) {
            if w[1].bucket_count() != 2 * w[0].bucket_count() {
                return Err("bucket counts do not double".into());
            }
        }
        if self.key_count() != self.entries.len() {
            return Err(format!(
                "key_count {} != stored entries {}",
                self.key_count(),
                self.entries.len()
            ));
        }
        if self.iter().count() != self.entries.len() {
            return Err("chains do not reach every entry".into());
        }
        for (_, e) in self.entries.iter() {
            let holders = self
                .generations
                .iter()
                .filter(|g| g.find(&self.entries, &e.key).is_some())
                .count();
            if holders != 1 {
                return Err(format!("{:?} found in {} generations", e.key, holders));
            }
        }
        if let Some(newest) = self.generations.last() {
            if newest.load_factor() > MAX_CHAIN_LENGTH {
                return Err("newest generation above threshold".into());
            }
        }
        Ok(())
    }
}

impl Default for LinkedHashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LinkedHashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedHashTable")
            .field("key_count", &self.key_count())
            .field("bucket_count", &self.bucket_count())
            .field("generations", &self.generations.len())
            .finish()
    }
}

/// Iterator over `(key, value)` pairs of a `LinkedHashTable`.
pub struct Iter<'a> {
    entries: &'a Arena,
    generations: core::slice::Iter<'a, Generation>,
    heads: core::slice::Iter<'a, Option<DefaultKey>>,
    cur: Option<DefaultKey>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot) = self.cur {
                let e = self.entries.get(slot)?;
                self.cur = e.next;
                return Some((e.key.as_str(), e.value.as_str()));
            }
            if let Some(head) = self.heads.next() {
                self.cur = *head;
                continue;
            }
            self.heads = self.generations.next()?.heads().iter();
        }
    }
}

impl<'a> IntoIterator for &'a LinkedHashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
