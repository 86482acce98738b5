//! Error types for the storage layer.

/// Errors from the room/config stores.
///
/// Absent rooms are not errors — the trait methods signal them through
/// their return values so callers can distinguish "missing" (a normal
/// outcome) from "the store itself failed".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file holds data we cannot (de)serialize.
    #[error("storage serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
