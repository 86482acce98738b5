//! End-to-end service tests over the in-memory store: room lifecycle,
//! pull/push reconciliation, and seat claims.

use std::sync::Arc;

use ludolink_protocol::{
    Cell, GameState, Gender, PlayerId, PlayerState, RoomCode,
};
use ludolink_room::{RoomError, RoomService};
use ludolink_store::MemoryStore;

fn service() -> RoomService<MemoryStore> {
    RoomService::new(Arc::new(MemoryStore::new()))
}

fn pid(s: &str) -> PlayerId {
    PlayerId(s.into())
}

/// A playable two-player state over a ten-cell board.
fn playable_state() -> GameState {
    let mut state = GameState::empty();
    state.cells = (1..=10)
        .map(|id| Cell {
            id,
            content: format!("task {id}"),
            effect: None,
        })
        .collect();
    state.players = vec![
        PlayerState {
            id: pid("p1"),
            name: "Alice".into(),
            gender: Gender::Male,
            position: 0,
            is_skipped: false,
            seat_index: 0,
        },
        PlayerState {
            id: pid("p2"),
            name: "Bea".into(),
            gender: Gender::Female,
            position: 0,
            is_skipped: false,
            seat_index: 1,
        },
    ];
    state
}

#[tokio::test]
async fn test_create_room_returns_code_and_unclaimed_seats() {
    let svc = service();
    let (code, seats) =
        svc.create_room(GameState::empty(), 2, 2).await.unwrap();

    assert_eq!(code.as_str().len(), 6);
    assert_eq!(seats.total_players, 4);
    assert!(!seats.is_full());

    let record = svc.join_room(&code).await.unwrap().unwrap();
    assert_eq!(record.seats.unwrap(), seats);
}

#[tokio::test]
async fn test_join_unknown_room_returns_none() {
    let svc = service();
    let code = RoomCode::parse("ABCDEF").unwrap();
    assert!(svc.join_room(&code).await.unwrap().is_none());
}

#[tokio::test]
async fn test_push_then_pull_round_trips() {
    let svc = service();
    let (code, _) =
        svc.create_room(GameState::empty(), 1, 1).await.unwrap();

    let mut pushed = playable_state();
    pushed.current_player_index = 1;
    let stamp = svc.push(&code, pushed.clone()).await.unwrap();

    let pull = svc.pull(&code, 0).await.unwrap();
    assert!(pull.updated);
    assert_eq!(pull.state.last_update, stamp);

    // Equal modulo the server-assigned stamp.
    pushed.last_update = stamp;
    assert_eq!(pull.state, pushed);
}

#[tokio::test]
async fn test_pull_at_current_version_reports_no_update() {
    let svc = service();
    let (code, _) =
        svc.create_room(GameState::empty(), 1, 1).await.unwrap();
    let stamp = svc.push(&code, playable_state()).await.unwrap();

    let pull = svc.pull(&code, stamp).await.unwrap();
    assert!(!pull.updated);
    // State and seats still travel on an un-updated pull.
    assert_eq!(pull.state.last_update, stamp);
    assert!(pull.seats.is_some());
}

#[tokio::test]
async fn test_push_to_missing_room_is_not_found() {
    let svc = service();
    let code = RoomCode::parse("ABCDEF").unwrap();
    let err = svc.push(&code, playable_state()).await.unwrap_err();
    assert!(matches!(err, RoomError::NotFound(_)));
}

#[tokio::test]
async fn test_push_rejects_malformed_snapshot() {
    let svc = service();
    let (code, _) =
        svc.create_room(GameState::empty(), 1, 1).await.unwrap();

    let mut bad = playable_state();
    bad.current_player_index = 9;
    let err = svc.push(&code, bad).await.unwrap_err();
    assert!(matches!(err, RoomError::Protocol(_)));

    // The reject left the room untouched.
    let pull = svc.pull(&code, 0).await.unwrap();
    assert!(pull.state.players.is_empty());
}

#[tokio::test]
async fn test_last_write_wins_between_competing_pushes() {
    let svc = service();
    let (code, _) =
        svc.create_room(GameState::empty(), 1, 1).await.unwrap();

    // Both clients start from the same base; each pushes its own view.
    let mut from_a = playable_state();
    from_a.players[0].position = 3;
    let mut from_b = playable_state();
    from_b.players[1].position = 5;

    let stamp_a = svc.push(&code, from_a).await.unwrap();
    let stamp_b = svc.push(&code, from_b).await.unwrap();
    assert!(stamp_b > stamp_a);

    // B's whole snapshot stands; A's move is gone.
    let pull = svc.pull(&code, stamp_a).await.unwrap();
    assert!(pull.updated);
    assert_eq!(pull.state.players[0].position, 0);
    assert_eq!(pull.state.players[1].position, 5);
}

#[tokio::test]
async fn test_claim_seat_conflict_preserves_holder() {
    let svc = service();
    let (code, _) =
        svc.create_room(GameState::empty(), 1, 1).await.unwrap();

    svc.claim_seat(&code, 0, &pid("p1"), "Alice").await.unwrap();
    let err = svc
        .claim_seat(&code, 0, &pid("p2"), "Bob")
        .await
        .unwrap_err();
    assert!(matches!(err, RoomError::SeatTaken(_, 0)));

    let pull = svc.pull(&code, 0).await.unwrap();
    let seats = pull.seats.unwrap();
    assert_eq!(seats.seats[0].player_id, Some(pid("p1")));
}

#[tokio::test]
async fn test_claim_seat_switch_frees_previous() {
    let svc = service();
    let (code, _) =
        svc.create_room(GameState::empty(), 1, 1).await.unwrap();

    svc.claim_seat(&code, 0, &pid("p1"), "Alice").await.unwrap();
    let seats =
        svc.claim_seat(&code, 1, &pid("p1"), "Alice").await.unwrap();

    assert!(seats.seats[0].player_id.is_none());
    assert_eq!(seats.seats[1].player_id, Some(pid("p1")));
}

#[tokio::test]
async fn test_seat_claims_visible_on_stale_pull() {
    let svc = service();
    let (code, _) =
        svc.create_room(GameState::empty(), 1, 1).await.unwrap();
    let base = svc.pull(&code, 0).await.unwrap().state.last_update;

    svc.claim_seat(&code, 0, &pid("p1"), "Alice").await.unwrap();

    // Seat changes do not bump the state version, but the layout still
    // arrives with the next poll.
    let pull = svc.pull(&code, base).await.unwrap();
    assert!(!pull.updated);
    let seats = pull.seats.unwrap();
    assert_eq!(seats.seats[0].player_name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn test_turn_flow_propagates_between_clients() {
    let svc = service();
    let (code, _) =
        svc.create_room(GameState::empty(), 1, 1).await.unwrap();
    svc.push(&code, playable_state()).await.unwrap();

    // Client A pulls, rolls locally, pushes the result.
    let mut state = svc.pull(&code, 0).await.unwrap().state;
    let seen = state.last_update;
    let outcome = ludolink_game::roll(&mut state, 4).unwrap();
    assert!(matches!(
        outcome,
        ludolink_game::RollOutcome::Landed { position: 4, .. }
    ));
    svc.push(&code, state).await.unwrap();

    // Client B's next poll observes the move.
    let pull = svc.pull(&code, seen).await.unwrap();
    assert!(pull.updated);
    assert_eq!(pull.state.players[0].position, 4);
}

#[tokio::test]
async fn test_monotonic_versions_across_mixed_writes() {
    let svc = service();
    let (code, _) =
        svc.create_room(GameState::empty(), 1, 1).await.unwrap();

    let mut last = 0;
    for _ in 0..20 {
        let stamp = svc.push(&code, playable_state()).await.unwrap();
        assert!(stamp > last);
        last = stamp;
    }
}
