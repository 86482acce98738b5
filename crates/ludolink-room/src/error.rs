//! Room-layer errors.

use ludolink_protocol::{ProtocolError, RoomCode};
use ludolink_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("room {0} not found")]
    NotFound(RoomCode),

    #[error("room {0} has no seat {1}")]
    SeatNotFound(RoomCode, usize),

    #[error("seat {1} in room {0} is already taken")]
    SeatTaken(RoomCode, usize),

    #[error("could not allocate a unique room code after {0} attempts")]
    CodesExhausted(u32),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
