//! Client-side errors.

use ludolink_protocol::{ProtocolError, RoomCode};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    #[error("seat {0} does not exist")]
    SeatNotFound(usize),

    #[error("seat {0} is already taken")]
    SeatTaken(usize),

    #[error("server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}
