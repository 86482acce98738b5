//! Room storage for Ludolink.
//!
//! The store is the single shared mutable resource in the system: a
//! keyed map from room code to [`RoomRecord`] with whole-value
//! replacement semantics. That is what makes last-write-wins tractable
//! — and it is also the source of the documented lost-update risk, so
//! no backend offers field-level updates.
//!
//! Two backends:
//!
//! - [`MemoryStore`] — plain in-process map; used when no storage path
//!   is configured (sync still works, nothing survives a restart).
//! - [`JsonFileStore`] — a single JSON file with an in-memory
//!   read-through/write-through shadow; the file is authoritative
//!   across restarts, the shadow never on its own.
//!
//! Version stamps are assigned here, at acceptance: every accepted
//! state write gets `max(now_ms, previous + 1)` so the per-room
//! version is strictly increasing even for same-millisecond writes.
//!
//! The default-config store ([`ConfigStore`]) lives here too: an
//! explicit get/set contract replacing any process-global "last saved
//! config" variable.

#![allow(async_fn_in_trait)]

mod backend;
mod error;
mod json_file;
mod memory;
mod store;

pub use backend::Backend;
pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::{now_ms, ConfigStore, RoomRecord, RoomStore};
