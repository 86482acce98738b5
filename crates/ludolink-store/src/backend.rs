//! Runtime backend selection.
//!
//! The HTTP layer holds one concrete store type; this enum dispatches
//! to memory or file storage based on configuration, without trait
//! objects (the store traits use native async methods and are not
//! object-safe).

use std::path::PathBuf;
use std::time::Duration;

use ludolink_protocol::{GameState, RoomCode, SeatConfig};

use crate::{
    ConfigStore, JsonFileStore, MemoryStore, RoomRecord, RoomStore,
    StoreError,
};

#[derive(Debug)]
pub enum Backend {
    Memory(MemoryStore),
    File(JsonFileStore),
}

impl Backend {
    /// Opens file storage when a path is configured, otherwise memory.
    pub async fn open(
        storage_path: Option<PathBuf>,
    ) -> Result<Self, StoreError> {
        match storage_path {
            Some(path) => {
                Ok(Self::File(JsonFileStore::open(path).await?))
            }
            None => {
                tracing::info!(
                    "no storage path configured, rooms are in-memory only"
                );
                Ok(Self::Memory(MemoryStore::new()))
            }
        }
    }
}

impl RoomStore for Backend {
    async fn create(
        &self,
        code: &RoomCode,
        state: GameState,
        seats: Option<SeatConfig>,
    ) -> Result<u64, StoreError> {
        match self {
            Self::Memory(s) => s.create(code, state, seats).await,
            Self::File(s) => s.create(code, state, seats).await,
        }
    }

    async fn get(
        &self,
        code: &RoomCode,
    ) -> Result<Option<RoomRecord>, StoreError> {
        match self {
            Self::Memory(s) => s.get(code).await,
            Self::File(s) => s.get(code).await,
        }
    }

    async fn exists(&self, code: &RoomCode) -> Result<bool, StoreError> {
        match self {
            Self::Memory(s) => s.exists(code).await,
            Self::File(s) => s.exists(code).await,
        }
    }

    async fn update_state(
        &self,
        code: &RoomCode,
        state: GameState,
    ) -> Result<Option<u64>, StoreError> {
        match self {
            Self::Memory(s) => s.update_state(code, state).await,
            Self::File(s) => s.update_state(code, state).await,
        }
    }

    async fn update_seats(
        &self,
        code: &RoomCode,
        seats: SeatConfig,
    ) -> Result<bool, StoreError> {
        match self {
            Self::Memory(s) => s.update_seats(code, seats).await,
            Self::File(s) => s.update_seats(code, seats).await,
        }
    }

    async fn expire_older_than(
        &self,
        max_age: Duration,
    ) -> Result<usize, StoreError> {
        match self {
            Self::Memory(s) => s.expire_older_than(max_age).await,
            Self::File(s) => s.expire_older_than(max_age).await,
        }
    }
}

impl ConfigStore for Backend {
    async fn get_default(
        &self,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        match self {
            Self::Memory(s) => s.get_default().await,
            Self::File(s) => s.get_default().await,
        }
    }

    async fn set_default(
        &self,
        config: serde_json::Value,
    ) -> Result<(), StoreError> {
        match self {
            Self::Memory(s) => s.set_default(config).await,
            Self::File(s) => s.set_default(config).await,
        }
    }
}
