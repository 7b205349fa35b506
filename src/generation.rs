//! Generation: one fixed-size array of bucket chains.
//!
//! Entries live in a `SlotMap` arena owned by the table; a generation only
//! stores chain heads, and each entry stores the slot of its successor. Chains
//! keep arrival order: new entries go to the tail, removals splice the
//! predecessor to the successor.

use crate::hash::bucket_index;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) next: Option<DefaultKey>,
}

pub(crate) type Arena = SlotMap<DefaultKey, Entry>;

#[derive(Debug, Clone)]
pub(crate) struct Generation {
    buckets: Box<[Option<DefaultKey>]>, // chain heads; length fixed at creation
    key_count: usize,
}

impl Generation {
    pub(crate) fn with_buckets(bucket_count: usize) -> Self {
        debug_assert!(bucket_count > 0);
        Self {
            buckets: vec![None; bucket_count].into_boxed_slice(),
            key_count: 0,
        }
    }

    /// The generation linked after this one: empty, twice the buckets.
    pub(crate) fn grown(&self) -> Self {
        Self::with_buckets(self.buckets.len() * 2)
    }

    #[inline]
    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub(crate) fn key_count(&self) -> usize {
        self.key_count
    }

    /// Keys per bucket in this generation alone.
    pub(crate) fn load_factor(&self) -> f64 {
        self.key_count as f64 / self.buckets.len() as f64
    }

    pub(crate) fn heads(&self) -> &[Option<DefaultKey>] {
        &self.buckets
    }

    fn chain<'a>(&self, arena: &'a Arena, bucket: usize) -> Chain<'a> {
        Chain {
            arena,
            cur: self.buckets[bucket],
        }
    }

    /// Slot of the entry holding `key`, if it lives in this generation.
    pub(crate) fn find(&self, arena: &Arena, key: &str) -> Option<DefaultKey> {
        let b = bucket_index(key, self.buckets.len());
        self.chain(arena, b)
            .find(|(_, e)| e.key == key)
            .map(|(slot, _)| slot)
    }

    /// Append a new entry at the tail of its chain. The caller guarantees
    /// `key` is not present anywhere in the table.
    pub(crate) fn append(&mut self, arena: &mut Arena, key: String, value: String) -> DefaultKey {
        let b = bucket_index(&key, self.buckets.len());
        let tail = self.chain(arena, b).last().map(|(slot, _)| slot);
        let slot = arena.insert(Entry {
            key,
            value,
            next: None,
        });
        match tail {
            Some(t) => arena[t].next = Some(slot),
            None => self.buckets[b] = Some(slot),
        }
        self.key_count += 1;
        slot
    }

    /// Unlink and return the entry holding `key`, keeping the rest of its
    /// chain in order.
    pub(crate) fn unlink(&mut self, arena: &mut Arena, key: &str) -> Option<Entry> {
        let b = bucket_index(key, self.buckets.len());
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[b];
        while let Some(slot) = cur {
            let entry = arena.get(slot)?;
            let next = entry.next;
            if entry.key == key {
                match prev {
                    Some(p) => arena[p].next = next,
                    None => self.buckets[b] = next,
                }
                self.key_count -= 1;
                return arena.remove(slot);
            }
            prev = Some(slot);
            cur = next;
        }
        None
    }
}

/// Walks one bucket chain from its head.
struct Chain<'a> {
    arena: &'a Arena,
    cur: Option<DefaultKey>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (DefaultKey, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cur?;
        let entry = self.arena.get(slot)?;
        self.cur = entry.next;
        Some((slot, entry))
    }
}
