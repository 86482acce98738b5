//! Error types for the protocol layer.

/// Errors raised at the protocol boundary.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The input is not a well-formed room code (wrong length or a
    /// character outside the unambiguous alphabet).
    #[error("invalid room code: {0:?}")]
    InvalidRoomCode(String),

    /// A payload parsed but violates a structural invariant — rejected
    /// at the push/storage boundary instead of being stored as-is.
    #[error("invalid state payload: {0}")]
    InvalidState(String),

    /// JSON (de)serialization failed.
    #[error("serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
