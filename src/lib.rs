//! int-keyed-map: small, single-threaded hash maps and sets keyed by native
//! `i32` values, without boxing keys or hashing them through a `Hasher`.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: replace `HashMap<i32, _>` in hot paths that hold at most a few
//!   hundred entries per instance.
//! - Layers:
//!   - IntKeyedTable<P>: separate-chaining engine. Owns the bucket slots,
//!     the entry arena and the growth policy. Exposes an upsert primitive
//!     (`manage_entry`) that builds payloads lazily through a factory.
//!   - IntIntMap, IntMap<V>, IntSet: thin containers that pick the payload
//!     (`i32`, `V`, `()`) and the replace/keep policy on top of the engine.
//!
//! Constraints
//! - Keys cover the full `i32` range. The bucket of a key is
//!   `(key & 0x7FFF_FFFF) % bucket_count`; the sign bit is masked rather
//!   than taking a modulo of a negative number.
//! - Bucket counts are odd and come from scaling a size hint by 0.85
//!   (minimum 3). Keys are not mixed before the modulo.
//! - Only an insert grows the table, and only when the target chain already
//!   holds 4 entries. The new bucket count is derived from twice the entry
//!   count (1.5x from 33 000 entries) and the insert is retried once
//!   without growth.
//! - `len` is the arena length, which always equals the number of entries
//!   reachable through the chains.
//!
//! Storage
//! - Entries live in a `SlotMap` arena; chains link arena keys. Growth
//!   relinks keys into a fresh bucket array without moving any entry.
//!   Removed entries are returned by value with their link cleared.
//!
//! Notes and non-goals
//! - Not synchronized. Traversals borrow the container, so structural
//!   changes during a traversal do not compile; sharing across threads
//!   needs an external lock around every call.
//! - Traversal order is unspecified and changes after growth.
//! - Logging goes through the `log` facade at trace level (table creation
//!   and growth); no logger is installed here.

mod error;
pub mod int_int_map;
pub mod int_keyed_table;
mod int_keyed_table_proptest;
pub mod int_map;
pub mod int_set;

// Public surface
pub use error::{Error, Result};
pub use int_int_map::IntIntMap;
pub use int_keyed_table::{Entry, IntKeyedTable, Keys};
pub use int_map::IntMap;
pub use int_set::IntSet;
