//! File-backed store: one JSON document, write-through shadow in memory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use ludolink_protocol::{GameState, RoomCode, SeatConfig};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;

use crate::store::next_stamp;
use crate::{ConfigStore, RoomRecord, RoomStore, StoreError, now_ms};

/// On-disk layout of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreData {
    #[serde(default)]
    rooms: HashMap<String, RoomRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_config: Option<serde_json::Value>,
}

/// A room store persisted to a single JSON file.
///
/// The in-memory copy is a write-through shadow: a mutation is applied
/// under the lock, the whole document is rewritten, and on a failed
/// write the shadow is rolled back to the previous record — so the
/// shadow never serves state the file does not hold, and the file is
/// re-read only at [`open`](Self::open). Writes go to a temp file in
/// the same directory and are renamed into place, so a crash mid-write
/// leaves the previous document intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl JsonFileStore {
    /// Opens (or initializes) the store at `path`, creating parent
    /// directories as needed. An unreadable or corrupt file starts the
    /// store fresh rather than refusing to boot.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let data = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "store file unreadable, starting fresh"
                    );
                    StoreData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                StoreData::default()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            path = %path.display(),
            rooms = data.rooms.len(),
            "file store opened"
        );
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Writes the document atomically: temp file, then rename.
    async fn persist(&self, data: &StoreData) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl RoomStore for JsonFileStore {
    async fn create(
        &self,
        code: &RoomCode,
        mut state: GameState,
        seats: Option<SeatConfig>,
    ) -> Result<u64, StoreError> {
        let mut data = self.data.write().await;
        let key = code.as_str().to_string();
        let stamp =
            next_stamp(data.rooms.get(&key).map(|r| r.updated_at));
        state.last_update = stamp;
        let previous = data.rooms.insert(
            key.clone(),
            RoomRecord {
                state,
                seats,
                updated_at: stamp,
            },
        );
        if let Err(e) = self.persist(&data).await {
            // Roll the shadow back; the file stays authoritative.
            match previous {
                Some(record) => data.rooms.insert(key, record),
                None => data.rooms.remove(&key),
            };
            return Err(e);
        }
        Ok(stamp)
    }

    async fn get(
        &self,
        code: &RoomCode,
    ) -> Result<Option<RoomRecord>, StoreError> {
        Ok(self.data.read().await.rooms.get(code.as_str()).cloned())
    }

    async fn exists(&self, code: &RoomCode) -> Result<bool, StoreError> {
        Ok(self.data.read().await.rooms.contains_key(code.as_str()))
    }

    async fn update_state(
        &self,
        code: &RoomCode,
        mut state: GameState,
    ) -> Result<Option<u64>, StoreError> {
        let mut data = self.data.write().await;
        let Some(record) = data.rooms.get_mut(code.as_str()) else {
            return Ok(None);
        };
        let previous = record.clone();
        let stamp = next_stamp(Some(record.updated_at));
        state.last_update = stamp;
        record.state = state;
        record.updated_at = stamp;
        if let Err(e) = self.persist(&data).await {
            data.rooms.insert(code.as_str().to_string(), previous);
            return Err(e);
        }
        Ok(Some(stamp))
    }

    async fn update_seats(
        &self,
        code: &RoomCode,
        seats: SeatConfig,
    ) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        let Some(record) = data.rooms.get_mut(code.as_str()) else {
            return Ok(false);
        };
        let previous = record.clone();
        record.seats = Some(seats);
        record.updated_at = next_stamp(Some(record.updated_at));
        if let Err(e) = self.persist(&data).await {
            data.rooms.insert(code.as_str().to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }

    async fn expire_older_than(
        &self,
        max_age: Duration,
    ) -> Result<usize, StoreError> {
        let cutoff = now_ms().saturating_sub(max_age.as_millis() as u64);
        let mut data = self.data.write().await;
        let expired: Vec<(String, RoomRecord)> = data
            .rooms
            .iter()
            .filter(|(_, record)| record.updated_at < cutoff)
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect();
        if expired.is_empty() {
            return Ok(0);
        }
        for (key, _) in &expired {
            data.rooms.remove(key);
        }
        if let Err(e) = self.persist(&data).await {
            for (key, record) in expired {
                data.rooms.insert(key, record);
            }
            return Err(e);
        }
        tracing::info!(removed = expired.len(), "expired stale rooms");
        Ok(expired.len())
    }
}

impl ConfigStore for JsonFileStore {
    async fn get_default(
        &self,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.data.read().await.default_config.clone())
    }

    async fn set_default(
        &self,
        config: serde_json::Value,
    ) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let previous = data.default_config.replace(config);
        if let Err(e) = self.persist(&data).await {
            data.default_config = previous;
            return Err(e);
        }
        Ok(())
    }
}
