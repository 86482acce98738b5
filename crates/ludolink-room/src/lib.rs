//! Room lifecycle and the server half of the Ludolink sync protocol:
//! code allocation, seat claims, pull/push reconciliation, and expiry.
//!
//! [`RoomService`] is the single entry point; it is generic over the
//! storage backend so the HTTP layer and the tests run the same logic
//! against different stores.

pub mod code;
pub mod seats;

mod error;
mod service;

pub use error::RoomError;
pub use service::{DEFAULT_EXPIRY, PullResult, RoomService};
