//! The turn state machine: roll, task completion, turn advancement.

use ludolink_protocol::{Cell, CellEffect, GameState};

use crate::GameError;

/// Sentinel move offset meaning "return to start" (position 0) rather
/// than a literal relative move.
pub const RETURN_TO_START: i32 = -999;

/// What a dice roll produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RollOutcome {
    /// The active player was flagged as skipped: the flag is cleared
    /// and the turn passes without moving.
    TurnSkipped,

    /// The player moved. `task` is the landed cell's content; when
    /// present the turn does NOT advance until the task completes.
    /// When absent (start revisit or empty cell) the turn has already
    /// advanced.
    Landed {
        position: usize,
        task: Option<Cell>,
    },

    /// The player reached the finish. Terminal until restart.
    Won { winner: String },
}

/// What completing a task produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Effect (if any) applied, turn advanced to the next player.
    TurnAdvanced,

    /// The "again" effect fired: the same player rolls again.
    RollAgain,
}

/// Applies a dice roll of `value` to the active player.
///
/// Movement clamps to the finish cell; reaching it wins immediately.
/// Landing on a content-carrying cell leaves the turn with the active
/// player until [`complete_task`] runs.
pub fn roll(state: &mut GameState, value: u8) -> Result<RollOutcome, GameError> {
    if state.players.is_empty() {
        return Err(GameError::NoPlayers);
    }
    if state.winner.is_some() {
        return Err(GameError::GameOver);
    }

    let idx = state.current_player_index;

    // A skipped player consumes their turn with an empty roll.
    if state.players[idx].is_skipped {
        state.players[idx].is_skipped = false;
        advance_turn(state);
        return Ok(RollOutcome::TurnSkipped);
    }

    state.can_roll_again = false;

    let last = state.last_index();
    let new_pos = (state.players[idx].position + value as usize).min(last);
    state.players[idx].position = new_pos;

    if new_pos == last {
        let winner = state.players[idx].name.clone();
        state.winner = Some(winner.clone());
        return Ok(RollOutcome::Won { winner });
    }

    let task = state.cell_at(new_pos).cloned();
    if task.is_none() {
        advance_turn(state);
    }
    Ok(RollOutcome::Landed {
        position: new_pos,
        task,
    })
}

/// Completes the pending task with an optional cell effect.
///
/// - `Move(Δ)`: adjust position by Δ, clamped to the track;
///   [`RETURN_TO_START`] jumps to position 0. Effect moves never win —
///   only a roll reaching the finish does.
/// - `Skip`: flag the active player; their next roll passes silently.
/// - `Again`: the same player keeps the turn and rolls again.
/// - `Swap`: exchange positions with the next player in turn order.
/// - `None`: advance the turn normally.
pub fn complete_task(
    state: &mut GameState,
    effect: Option<CellEffect>,
) -> Result<TaskOutcome, GameError> {
    if state.players.is_empty() {
        return Err(GameError::NoPlayers);
    }
    if state.winner.is_some() {
        return Err(GameError::GameOver);
    }

    let idx = state.current_player_index;
    let last = state.last_index();

    match effect {
        Some(CellEffect::Move { value }) => {
            let pos = state.players[idx].position;
            let new_pos = if value == RETURN_TO_START {
                0
            } else {
                pos.saturating_add_signed(value as isize).min(last)
            };
            state.players[idx].position = new_pos;
        }
        Some(CellEffect::Skip) => {
            state.players[idx].is_skipped = true;
        }
        Some(CellEffect::Again) => {
            state.can_roll_again = true;
            return Ok(TaskOutcome::RollAgain);
        }
        Some(CellEffect::Swap) => {
            let other = (idx + 1) % state.players.len();
            if other != idx {
                let a = state.players[idx].position;
                let b = state.players[other].position;
                state.players[idx].position = b;
                state.players[other].position = a;
            }
        }
        None => {}
    }

    advance_turn(state);
    Ok(TaskOutcome::TurnAdvanced)
}

/// Advances the active-turn pointer round-robin over the player list.
pub fn advance_turn(state: &mut GameState) {
    if state.players.is_empty() {
        return;
    }
    state.current_player_index =
        (state.current_player_index + 1) % state.players.len();
}

/// Re-initializes a finished (or in-progress) game: every position back
/// to 0, flags and winner cleared, a freshly shuffled board installed.
pub fn restart(state: &mut GameState, board: crate::Board) {
    for player in &mut state.players {
        player.position = 0;
        player.is_skipped = false;
    }
    state.current_player_index = 0;
    state.can_roll_again = false;
    state.winner = None;
    state.cells = board.cells;
    state.endpoint_cells = board.endpoint_cells;
}
