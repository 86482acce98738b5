//! Turn and game-state logic for Ludolink.
//!
//! This crate is the payload side of the sync protocol: it computes the
//! next [`GameState`](ludolink_protocol::GameState) snapshot that a
//! client pushes after a local action. It owns no I/O and no storage —
//! every operation is a pure mutation of a state value, so the same code
//! runs in tests, in the client, and anywhere a server-side referee
//! might later live.
//!
//! # The turn machine
//!
//! ```text
//! AwaitingRoll(p) ──roll──→ TaskPending(p, cell) ──complete──→ AwaitingRoll(next)
//!       │    ↑                       │
//!       │    └───── again effect ────┘
//!       └──roll to finish──→ Won(p)   (terminal until restart)
//! ```

mod board;
mod error;
mod turn;

pub use board::{roll_die, Board};
pub use error::GameError;
pub use turn::{
    advance_turn, complete_task, restart, roll, RollOutcome, TaskOutcome,
    RETURN_TO_START,
};
