//! Store traits and the persisted record shape.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use ludolink_protocol::{GameState, RoomCode, SeatConfig};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Milliseconds since the Unix epoch, saturating at zero if the clock
/// is set before 1970.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One room as persisted: the synchronized state, the optional seat
/// layout, and the server-side freshness stamp used for both pull
/// ordering and expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub state: GameState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<SeatConfig>,
    pub updated_at: u64,
}

/// Durable keyed storage for rooms.
///
/// All mutating operations stamp `updated_at` (and, for state writes,
/// `state.last_update`) server-side at acceptance — clients never
/// control the ordering timestamp. Writes replace the whole value;
/// there are no partial updates by design.
pub trait RoomStore: Send + Sync {
    /// Creates (or idempotently overwrites) a room. Callers that need
    /// uniqueness must pre-check with [`exists`](Self::exists).
    /// Returns the assigned version stamp.
    async fn create(
        &self,
        code: &RoomCode,
        state: GameState,
        seats: Option<SeatConfig>,
    ) -> Result<u64, StoreError>;

    /// Fetches a room's record, or `None` if absent.
    async fn get(&self, code: &RoomCode) -> Result<Option<RoomRecord>, StoreError>;

    /// Returns `true` if the room exists.
    async fn exists(&self, code: &RoomCode) -> Result<bool, StoreError>;

    /// Replaces a room's state. Returns the new version stamp, or
    /// `None` (no partial write) if the room does not exist — callers
    /// must `create` first.
    async fn update_state(
        &self,
        code: &RoomCode,
        state: GameState,
    ) -> Result<Option<u64>, StoreError>;

    /// Replaces a room's seat layout. Returns `false` if the room does
    /// not exist. Bumps the freshness stamp but not the state version:
    /// seat layouts travel on every pull regardless of `updated`.
    async fn update_seats(
        &self,
        code: &RoomCode,
        seats: SeatConfig,
    ) -> Result<bool, StoreError>;

    /// Deletes rooms whose stamp precedes `now − max_age`. Returns how
    /// many were removed. Safe to call concurrently with reads and
    /// writes; a single room is never observed half-deleted.
    async fn expire_older_than(
        &self,
        max_age: Duration,
    ) -> Result<usize, StoreError>;
}

/// Explicit storage for the admin-managed default board config.
///
/// Loaded on demand, written on explicit save — never a module-level
/// variable. The document is opaque JSON: its shape belongs to the
/// external board generator.
pub trait ConfigStore: Send + Sync {
    async fn get_default(&self)
        -> Result<Option<serde_json::Value>, StoreError>;

    async fn set_default(
        &self,
        config: serde_json::Value,
    ) -> Result<(), StoreError>;
}

/// Computes the next strictly-increasing stamp for a room.
pub(crate) fn next_stamp(previous: Option<u64>) -> u64 {
    let now = now_ms();
    match previous {
        Some(prev) => now.max(prev + 1),
        None => now,
    }
}
