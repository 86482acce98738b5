//! The server half of the reconciliation protocol.

use std::sync::Arc;
use std::time::Duration;

use ludolink_protocol::{GameState, PlayerId, RoomCode, SeatConfig};
use ludolink_store::{RoomRecord, RoomStore};

use crate::{RoomError, code, seats};

/// How long an untouched room survives before the sweep removes it.
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(24 * 60 * 60);

/// One pull, as the service answers it.
///
/// `state` and `seats` are returned on every pull regardless of
/// `updated`; the flag only tells the client whether `state` is newer
/// than what it reported seeing. Seat layouts carry no version of their
/// own, so clients always apply them.
#[derive(Debug, Clone, PartialEq)]
pub struct PullResult {
    pub updated: bool,
    pub state: GameState,
    pub seats: Option<SeatConfig>,
}

/// Room lifecycle and state reconciliation over a [`RoomStore`].
#[derive(Debug)]
pub struct RoomService<S> {
    store: Arc<S>,
    expiry: Duration,
}

impl<S> Clone for RoomService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            expiry: self.expiry,
        }
    }
}

impl<S: RoomStore> RoomService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_expiry(store, DEFAULT_EXPIRY)
    }

    pub fn with_expiry(store: Arc<S>, expiry: Duration) -> Self {
        Self { store, expiry }
    }

    /// Creates a room with a fresh unique code and an unclaimed seat
    /// list of `male_count` + `female_count` seats.
    ///
    /// Runs the expiry sweep first: room creation is the natural
    /// opportunistic moment to shed stale rooms without a background
    /// task. A failing sweep is logged and never blocks creation.
    pub async fn create_room(
        &self,
        state: GameState,
        male_count: usize,
        female_count: usize,
    ) -> Result<(RoomCode, SeatConfig), RoomError> {
        state.validate()?;

        if let Err(e) = self.store.expire_older_than(self.expiry).await {
            tracing::warn!(error = %e, "expiry sweep failed");
        }

        let code = code::create_unique(&*self.store).await?;
        let seat_config = SeatConfig::build(male_count, female_count);
        self.store
            .create(&code, state, Some(seat_config.clone()))
            .await?;
        tracing::info!(
            room = %code,
            players = seat_config.total_players,
            "room created"
        );
        Ok((code, seat_config))
    }

    /// Looks up a room for a joining client. `None` means no such room;
    /// the caller decides how to surface that (the HTTP layer answers
    /// with an `exists: false` body rather than an error status).
    pub async fn join_room(
        &self,
        code: &RoomCode,
    ) -> Result<Option<RoomRecord>, RoomError> {
        Ok(self.store.get(code).await?)
    }

    /// Answers a poll: the current state and seats, plus whether the
    /// state moved past the client's last-seen version.
    pub async fn pull(
        &self,
        code: &RoomCode,
        since: u64,
    ) -> Result<PullResult, RoomError> {
        let record = self
            .store
            .get(code)
            .await?
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        Ok(PullResult {
            updated: record.state.last_update > since,
            state: record.state,
            seats: record.seats,
        })
    }

    /// Accepts a pushed snapshot: shape-validates it, then replaces the
    /// room's state unconditionally (last write wins). Returns the
    /// assigned version stamp.
    pub async fn push(
        &self,
        code: &RoomCode,
        state: GameState,
    ) -> Result<u64, RoomError> {
        state.validate()?;
        match self.store.update_state(code, state).await? {
            Some(stamp) => Ok(stamp),
            None => Err(RoomError::NotFound(code.clone())),
        }
    }

    /// Claims (or switches to) a seat for `player` and persists the new
    /// layout. Returns the updated seat configuration.
    pub async fn claim_seat(
        &self,
        code: &RoomCode,
        seat_index: usize,
        player: &PlayerId,
        player_name: &str,
    ) -> Result<SeatConfig, RoomError> {
        let record = self
            .store
            .get(code)
            .await?
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        let mut config = record
            .seats
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;

        seats::claim(&mut config, seat_index, player, player_name)
            .map_err(|e| match e {
                seats::ClaimError::SeatNotFound => {
                    RoomError::SeatNotFound(code.clone(), seat_index)
                }
                seats::ClaimError::SeatTaken => {
                    RoomError::SeatTaken(code.clone(), seat_index)
                }
            })?;

        if !self.store.update_seats(code, config.clone()).await? {
            return Err(RoomError::NotFound(code.clone()));
        }
        tracing::info!(
            room = %code,
            seat = seat_index,
            player = %player,
            "seat claimed"
        );
        Ok(config)
    }

    /// Removes rooms idle longer than the configured expiry window.
    pub async fn sweep(&self) -> Result<usize, RoomError> {
        Ok(self.store.expire_older_than(self.expiry).await?)
    }
}
