//! Wire and data types for the Ludolink room sync protocol.
//!
//! This crate defines everything that travels between client and server
//! or gets persisted by the room store:
//!
//! - **Identity** ([`RoomCode`], [`PlayerId`], [`Gender`]) — who and where.
//! - **State** ([`GameState`], [`SeatConfig`], [`Cell`], etc.) — the
//!   synchronized payload.
//! - **Wire** ([`PullResponse`], [`PushRequest`], etc.) — the exact JSON
//!   shapes of the HTTP endpoints.
//! - **Errors** ([`ProtocolError`]) — what can go wrong at the boundary.
//!
//! # Architecture
//!
//! The protocol layer sits below everything else. It knows nothing about
//! storage, rooms, or polling — it only defines shapes and validates them.
//! Payload validation happens here so the push endpoint can reject
//! malformed state instead of trusting client-supplied JSON.

mod error;
mod ids;
mod state;
mod wire;

pub use error::ProtocolError;
pub use ids::{Gender, PlayerId, RoomCode, CODE_ALPHABET, CODE_LEN};
pub use state::{
    Cell, CellEffect, GameState, PlayerState, Seat, SeatConfig, TimerState,
};
pub use wire::{
    ClaimSeatRequest, CreateRoomRequest, CreateRoomResponse,
    DefaultConfigRequest, DefaultConfigResponse, ErrorBody, JoinResponse,
    PullResponse, PushRequest, PushResponse, SeatResponse,
    SyncStatusResponse,
};
