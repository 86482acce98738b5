//! The polling sync client.
//!
//! No push channel exists: every client polls on a fixed interval and
//! reconciles against the server's version stamp. A poll that returns a
//! stamp at or below the last-seen value is discarded; seat layouts
//! carry no stamp and are applied on every poll. Pushes are optimistic,
//! so the local view reflects an action immediately and the server's
//! answer only settles the version number.

use std::sync::Arc;
use std::time::Duration;

use ludolink_protocol::{
    ClaimSeatRequest, CreateRoomRequest, GameState, PlayerId, PushRequest,
    RoomCode, SeatConfig,
};
use tokio::sync::{Mutex, watch};

use crate::{ClientError, SyncTransport};

/// Default poll cadence. Fast enough that a turn handoff feels
/// immediate at a shared table, slow enough to stay negligible load.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(800);

/// A snapshot of the client's current view of the room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomView {
    pub state: GameState,
    pub seats: Option<SeatConfig>,
    /// False after a failed poll or push, true again after the next
    /// success. Purely informational; polling never stops on failure.
    pub connected: bool,
}

#[derive(Debug)]
struct Inner {
    state: GameState,
    seats: Option<SeatConfig>,
    last_seen: u64,
    connected: bool,
    /// True while a push is on the wire. Gates `can_act` so one local
    /// action cannot overlap another.
    push_in_flight: bool,
}

/// One player's connection to one room.
///
/// Clone-cheap handles: the view is shared, so a UI task and the
/// background poller observe the same room.
#[derive(Debug)]
pub struct SyncClient<T> {
    transport: Arc<T>,
    room: RoomCode,
    player: PlayerId,
    poll_interval: Duration,
    inner: Arc<Mutex<Inner>>,
    shutdown: watch::Sender<bool>,
}

impl<T> Clone for SyncClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            room: self.room.clone(),
            player: self.player.clone(),
            poll_interval: self.poll_interval,
            inner: Arc::clone(&self.inner),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<T: SyncTransport + 'static> SyncClient<T> {
    /// Creates a room seeded with `state` and returns a client already
    /// joined to it.
    pub async fn create_room(
        transport: Arc<T>,
        player: PlayerId,
        state: GameState,
        male_count: usize,
        female_count: usize,
    ) -> Result<Self, ClientError> {
        let resp = transport
            .create_room(&CreateRoomRequest {
                state: state.clone(),
                male_count,
                female_count,
            })
            .await?;
        tracing::info!(room = %resp.room_id, "room created");
        Ok(Self::assemble(
            transport,
            resp.room_id,
            player,
            state,
            Some(resp.seats),
        ))
    }

    /// Joins an existing room by code.
    pub async fn join_room(
        transport: Arc<T>,
        player: PlayerId,
        room: RoomCode,
    ) -> Result<Self, ClientError> {
        let resp = transport.join_room(&room).await?;
        if !resp.exists {
            return Err(ClientError::RoomNotFound(room));
        }
        let Some(state) = resp.state else {
            return Err(ClientError::RoomNotFound(room));
        };
        tracing::info!(room = %room, "joined room");
        Ok(Self::assemble(transport, room, player, state, resp.seats))
    }

    fn assemble(
        transport: Arc<T>,
        room: RoomCode,
        player: PlayerId,
        state: GameState,
        seats: Option<SeatConfig>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        let last_seen = state.last_update;
        Self {
            transport,
            room,
            player,
            poll_interval: DEFAULT_POLL_INTERVAL,
            inner: Arc::new(Mutex::new(Inner {
                state,
                seats,
                last_seen,
                connected: true,
                push_in_flight: false,
            })),
            shutdown,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn room(&self) -> &RoomCode {
        &self.room
    }

    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    /// The current local view of the room.
    pub async fn view(&self) -> RoomView {
        let inner = self.inner.lock().await;
        RoomView {
            state: inner.state.clone(),
            seats: inner.seats.clone(),
            connected: inner.connected,
        }
    }

    /// Whether this player may act right now: every seat claimed, no
    /// winner yet, no push still on the wire, and the active player is
    /// us. This gates the UI only; the server accepts any well-formed
    /// push.
    pub async fn can_act(&self) -> bool {
        let inner = self.inner.lock().await;
        let seats_full =
            inner.seats.as_ref().is_some_and(SeatConfig::is_full);
        !inner.push_in_flight
            && seats_full
            && inner.state.winner.is_none()
            && inner
                .state
                .active_player()
                .is_some_and(|p| p.id == self.player)
    }

    /// Runs one poll and reconciles the local view. Returns whether a
    /// newer state was applied. Transport failures flip the connected
    /// flag and are swallowed; the next tick retries.
    pub async fn poll_once(&self) -> bool {
        let since = self.inner.lock().await.last_seen;
        match self.transport.pull(&self.room, since).await {
            Ok(resp) => {
                let mut inner = self.inner.lock().await;
                inner.connected = true;
                inner.seats = resp.seats;
                if resp.updated && resp.state.last_update > inner.last_seen
                {
                    inner.last_seen = resp.state.last_update;
                    inner.state = resp.state;
                    return true;
                }
                false
            }
            Err(e) => {
                tracing::debug!(room = %self.room, error = %e, "poll failed");
                self.inner.lock().await.connected = false;
                false
            }
        }
    }

    /// The background poll loop: one [`poll_once`](Self::poll_once) per
    /// tick until [`stop`](Self::stop) is called. Spawn it on a cloned
    /// handle: `tokio::spawn(client.clone().run_poller())`.
    pub async fn run_poller(self) {
        let mut stop = self.shutdown.subscribe();
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(
            tokio::time::MissedTickBehavior::Delay,
        );
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::debug!(room = %self.room, "poller stopped");
    }

    /// Stops the background poller, if one is running.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Pushes a snapshot and applies it locally with the stamp the
    /// server assigned. The local view updates even if a concurrent
    /// push from another client later overwrites it — last write wins.
    pub async fn push_state(
        &self,
        state: GameState,
    ) -> Result<u64, ClientError> {
        self.inner.lock().await.push_in_flight = true;
        let result = self
            .transport
            .push(&PushRequest {
                room_id: self.room.clone(),
                state: state.clone(),
            })
            .await;

        let mut inner = self.inner.lock().await;
        inner.push_in_flight = false;
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                inner.connected = false;
                return Err(e);
            }
        };
        inner.connected = true;
        if resp.last_update > inner.last_seen {
            inner.last_seen = resp.last_update;
            let mut state = state;
            state.last_update = resp.last_update;
            inner.state = state;
        }
        Ok(resp.last_update)
    }

    /// Claims (or switches to) a seat and applies the returned layout.
    pub async fn claim_seat(
        &self,
        seat_index: usize,
        player_name: &str,
    ) -> Result<SeatConfig, ClientError> {
        let resp = self
            .transport
            .claim_seat(&ClaimSeatRequest {
                room_id: self.room.clone(),
                seat_index,
                player_id: self.player.clone(),
                player_name: player_name.to_string(),
            })
            .await?;
        self.inner.lock().await.seats = Some(resp.seats.clone());
        Ok(resp.seats)
    }
}
