//! In-process store backend.

use std::collections::HashMap;
use std::time::Duration;

use ludolink_protocol::{GameState, RoomCode, SeatConfig};
use tokio::sync::RwLock;

use crate::store::next_stamp;
use crate::{ConfigStore, RoomRecord, RoomStore, StoreError, now_ms};

/// A purely in-memory room store.
///
/// Used when no storage path is configured and as the test double for
/// everything above the storage layer. Whole records are cloned in and
/// out under the lock, so readers never observe a torn room.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: RwLock<HashMap<String, RoomRecord>>,
    default_config: RwLock<Option<serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms currently held.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl RoomStore for MemoryStore {
    async fn create(
        &self,
        code: &RoomCode,
        mut state: GameState,
        seats: Option<SeatConfig>,
    ) -> Result<u64, StoreError> {
        let mut rooms = self.rooms.write().await;
        let stamp =
            next_stamp(rooms.get(code.as_str()).map(|r| r.updated_at));
        state.last_update = stamp;
        rooms.insert(
            code.as_str().to_string(),
            RoomRecord {
                state,
                seats,
                updated_at: stamp,
            },
        );
        Ok(stamp)
    }

    async fn get(
        &self,
        code: &RoomCode,
    ) -> Result<Option<RoomRecord>, StoreError> {
        Ok(self.rooms.read().await.get(code.as_str()).cloned())
    }

    async fn exists(&self, code: &RoomCode) -> Result<bool, StoreError> {
        Ok(self.rooms.read().await.contains_key(code.as_str()))
    }

    async fn update_state(
        &self,
        code: &RoomCode,
        mut state: GameState,
    ) -> Result<Option<u64>, StoreError> {
        let mut rooms = self.rooms.write().await;
        let Some(record) = rooms.get_mut(code.as_str()) else {
            return Ok(None);
        };
        let stamp = next_stamp(Some(record.updated_at));
        state.last_update = stamp;
        record.state = state;
        record.updated_at = stamp;
        Ok(Some(stamp))
    }

    async fn update_seats(
        &self,
        code: &RoomCode,
        seats: SeatConfig,
    ) -> Result<bool, StoreError> {
        let mut rooms = self.rooms.write().await;
        let Some(record) = rooms.get_mut(code.as_str()) else {
            return Ok(false);
        };
        record.seats = Some(seats);
        record.updated_at = next_stamp(Some(record.updated_at));
        Ok(true)
    }

    async fn expire_older_than(
        &self,
        max_age: Duration,
    ) -> Result<usize, StoreError> {
        let cutoff = now_ms().saturating_sub(max_age.as_millis() as u64);
        let mut rooms = self.rooms.write().await;
        let before = rooms.len();
        rooms.retain(|_, record| record.updated_at >= cutoff);
        Ok(before - rooms.len())
    }
}

impl ConfigStore for MemoryStore {
    async fn get_default(
        &self,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.default_config.read().await.clone())
    }

    async fn set_default(
        &self,
        config: serde_json::Value,
    ) -> Result<(), StoreError> {
        *self.default_config.write().await = Some(config);
        Ok(())
    }
}
