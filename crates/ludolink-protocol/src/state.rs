//! The synchronized payload: game state, seats, cells, timer.
//!
//! These are the shapes that get pushed wholesale and pulled back by
//! every client in a room. Field names serialize in camelCase to match
//! the JSON the browser clients produce.
//!
//! The board track is laid out as `start + cells + endpoint_cells +
//! finish`; index 0 (start) and the final index (finish) carry no
//! content, and the endpoint zone begins right after the regular cells.

use serde::{Deserialize, Serialize};

use crate::{Gender, PlayerId, ProtocolError};

/// The effect a cell applies when its task is completed.
///
/// `Move` carries a signed offset; the special value `-999` means
/// "return to start" rather than a literal offset (see `ludolink-game`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellEffect {
    Move {
        #[serde(default)]
        value: i32,
    },
    Skip,
    Again,
    Swap,
}

/// One board cell. Content generation and task tables are external;
/// the sync core carries cells as opaque data plus an optional effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub id: u32,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<CellEffect>,
}

/// A player's in-game record, created at seat-claim time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub gender: Gender,
    pub position: usize,
    pub is_skipped: bool,
    pub seat_index: usize,
}

/// Shared countdown timer, synchronized with the rest of the payload.
/// No independent versioning — it rides along with every push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub duration: u64,
    pub time_left: u64,
    pub is_running: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            duration: 60,
            time_left: 60,
            is_running: false,
        }
    }
}

/// One gendered seat in a room's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub index: usize,
    pub gender: Gender,
    pub player_id: Option<PlayerId>,
    pub player_name: Option<String>,
}

impl Seat {
    /// Returns `true` if the seat is held by someone other than `player`.
    pub fn taken_by_other(&self, player: &PlayerId) -> bool {
        matches!(&self.player_id, Some(held) if held != player)
    }
}

/// The ordered seat list for a room.
///
/// Invariant: `seats.len() == male_count + female_count ==
/// total_players`, male seats first, and no two seats share an
/// occupant. [`SeatConfig::validate`] checks all of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatConfig {
    pub male_count: usize,
    pub female_count: usize,
    pub total_players: usize,
    pub seats: Vec<Seat>,
}

impl SeatConfig {
    /// Builds an unclaimed seat list: `male_count` male seats followed
    /// by `female_count` female seats.
    pub fn build(male_count: usize, female_count: usize) -> Self {
        let mut seats = Vec::with_capacity(male_count + female_count);
        for _ in 0..male_count {
            seats.push(Seat {
                index: seats.len(),
                gender: Gender::Male,
                player_id: None,
                player_name: None,
            });
        }
        for _ in 0..female_count {
            seats.push(Seat {
                index: seats.len(),
                gender: Gender::Female,
                player_id: None,
                player_name: None,
            });
        }
        Self {
            male_count,
            female_count,
            total_players: male_count + female_count,
            seats,
        }
    }

    /// Returns `true` when every seat has an occupant — the room's
    /// "setup → playable" gate.
    pub fn is_full(&self) -> bool {
        self.seats.iter().all(|s| s.player_id.is_some())
    }

    /// The seat index currently held by `player`, if any.
    pub fn seat_of(&self, player: &PlayerId) -> Option<usize> {
        self.seats
            .iter()
            .find(|s| s.player_id.as_ref() == Some(player))
            .map(|s| s.index)
    }

    /// Checks the structural invariants.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.total_players != self.male_count + self.female_count {
            return Err(ProtocolError::InvalidState(
                "total_players must equal male_count + female_count".into(),
            ));
        }
        if self.seats.len() != self.total_players {
            return Err(ProtocolError::InvalidState(format!(
                "expected {} seats, found {}",
                self.total_players,
                self.seats.len()
            )));
        }
        for (i, seat) in self.seats.iter().enumerate() {
            if seat.index != i {
                return Err(ProtocolError::InvalidState(format!(
                    "seat at position {i} carries index {}",
                    seat.index
                )));
            }
        }
        // No two seats may hold the same occupant.
        for (i, seat) in self.seats.iter().enumerate() {
            if let Some(pid) = &seat.player_id {
                let dup = self.seats[i + 1..]
                    .iter()
                    .any(|other| other.player_id.as_ref() == Some(pid));
                if dup {
                    return Err(ProtocolError::InvalidState(format!(
                        "player {pid} occupies more than one seat"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The versioned snapshot that the reconciliation protocol synchronizes.
///
/// `last_update` is the server-assigned monotonic stamp (milliseconds
/// since epoch): the store overwrites it on every accepted push, and a
/// client only applies a pulled state whose stamp exceeds its last-seen
/// value. Clients never set it for ordering purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: Vec<PlayerState>,
    pub current_player_index: usize,
    pub can_roll_again: bool,
    pub winner: Option<String>,
    pub cells: Vec<Cell>,
    pub endpoint_cells: Vec<Cell>,
    #[serde(default)]
    pub timer: TimerState,
    #[serde(default)]
    pub last_update: u64,
}

impl GameState {
    /// An initial state for a room still in setup: no players, no board.
    pub fn empty() -> Self {
        Self {
            players: Vec::new(),
            current_player_index: 0,
            can_roll_again: false,
            winner: None,
            cells: Vec::new(),
            endpoint_cells: Vec::new(),
            timer: TimerState::default(),
            last_update: 0,
        }
    }

    /// Total track length: start cell + board cells + endpoint zone +
    /// finish cell.
    pub fn track_len(&self) -> usize {
        self.cells.len() + self.endpoint_cells.len() + 2
    }

    /// Index of the finish cell.
    pub fn last_index(&self) -> usize {
        self.track_len() - 1
    }

    /// Content at a track index. Start and finish carry none; the
    /// endpoint zone begins right after the regular cells.
    pub fn cell_at(&self, index: usize) -> Option<&Cell> {
        if index == 0 || index >= self.last_index() {
            return None;
        }
        let endpoint_start = self.cells.len() + 1;
        if index >= endpoint_start {
            self.endpoint_cells.get(index - endpoint_start)
        } else {
            self.cells.get(index - 1)
        }
    }

    /// The player whose turn it is, if any players have joined.
    pub fn active_player(&self) -> Option<&PlayerState> {
        self.players.get(self.current_player_index)
    }

    /// Validates a client-pushed snapshot at the storage boundary.
    ///
    /// This is shape-level validation (indices in range, positions on
    /// the track) — not turn-legality enforcement, which stays
    /// client-side by design.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.players.is_empty() {
            if self.current_player_index != 0 {
                return Err(ProtocolError::InvalidState(
                    "active player index set with no players".into(),
                ));
            }
        } else if self.current_player_index >= self.players.len() {
            return Err(ProtocolError::InvalidState(format!(
                "active player index {} out of range for {} players",
                self.current_player_index,
                self.players.len()
            )));
        }
        let last = self.last_index();
        for player in &self.players {
            if player.position > last {
                return Err(ProtocolError::InvalidState(format!(
                    "player {} at position {} beyond track end {last}",
                    player.id, player.position
                )));
            }
        }
        Ok(())
    }
}
