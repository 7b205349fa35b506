//! linked-hashtable: a string-keyed chained hash table that grows by linking
//! larger generations instead of rehashing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep every stored entry where it was first placed. Growth never
//!   rehashes; it appends a bigger, empty generation that receives all new
//!   keys from then on.
//! - Layers:
//!   - `hash_code`: 65599-multiplier polynomial hash over the key's bytes;
//!     bucket index is `hash % bucket_count` of the generation probed.
//!   - `Generation`: fixed array of chain heads plus its own key count.
//!     Entries live in a `SlotMap` arena owned by the table and link to
//!     their chain successor by slot key.
//!   - `LinkedHashTable`: the generation list (oldest first) and the public
//!     operations. Lookups walk generations oldest to newest.
//!
//! Constraints
//! - Exactly one entry per key across all generations: insert searches the
//!   whole table first and updates in place when the key exists.
//! - Bucket arrays never resize; generation `i + 1` has twice the buckets of
//!   generation `i`, starting at `INITIAL_BUCKETS`.
//! - Expansion is decided only right after a new key lands in the newest
//!   generation, and only against that generation's own load factor.
//! - Chains keep arrival order; delete splices the predecessor to the
//!   successor.
//!
//! Errors and allocation
//! - `TableError::NotFound` for absent keys on search/delete;
//!   `TableError::InvalidArgument` for keys or values containing NUL, which
//!   the C-string model of the table cannot represent. Failed calls leave
//!   the table untouched.
//! - Allocation failure aborts the process through the global allocator;
//!   there is no recoverable out-of-memory path.
//!
//! Notes and non-goals
//! - Single-threaded use; mutation requires `&mut`.
//! - Generations are never merged or rebalanced; only `reset` drops them.
//! - Keys and values are owned `String`s; lookups hand out owned copies.

mod error;
mod generation;
mod hash;
mod linked_hash_table;
mod linked_hash_table_proptest;

// Public surface
pub use error::TableError;
pub use hash::{hash_code, HASH_MULTIPLIER};
pub use linked_hash_table::{
    GenerationStats, Iter, LinkedHashTable, INITIAL_BUCKETS, MAX_CHAIN_LENGTH,
};
