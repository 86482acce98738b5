//! Error types for the game layer.

/// Errors from turn operations.
///
/// These mark caller bugs (acting on a finished or playerless game),
/// not gameplay outcomes — legal plays are expressed through
/// [`RollOutcome`](crate::RollOutcome) and
/// [`TaskOutcome`](crate::TaskOutcome).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    /// No players have joined yet; there is no turn to take.
    #[error("no players in game")]
    NoPlayers,

    /// The game already has a winner; only a restart resets it.
    #[error("game is over")]
    GameOver,
}
