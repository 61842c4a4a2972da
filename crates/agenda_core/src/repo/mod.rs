//! Repository layer: the item store contract and its implementations.
//!
//! # Responsibility
//! - Define the one capability set every agenda kind's storage exposes.
//! - Isolate SQLite query details from the scheduling engine.
//!
//! # Invariants
//! - Read paths never fail: unreadable storage degrades to "no data".
//! - Write paths surface failures to the caller as `RepoError`.
//! - `save` is an upsert by id; `delete_by_id` on an absent id is a no-op.

pub mod item_store;
pub mod memory_store;
pub mod records;
