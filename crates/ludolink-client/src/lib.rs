//! The client half of the Ludolink sync protocol.
//!
//! A [`SyncClient`] joins (or creates) a room over a [`SyncTransport`],
//! polls the server on a fixed cadence, and reconciles the local view
//! against the server's version stamps. [`HttpTransport`] is the
//! production transport; the trait seam exists so tests can drive the
//! client against an in-process server.

#![allow(async_fn_in_trait)]

mod client;
mod error;
mod identity;
mod transport;

pub use client::{DEFAULT_POLL_INTERVAL, RoomView, SyncClient};
pub use error::ClientError;
pub use identity::generate_player_id;
pub use transport::{HttpTransport, SyncTransport};
