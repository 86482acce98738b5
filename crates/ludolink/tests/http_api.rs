//! End-to-end tests: real server on an ephemeral port, real HTTP
//! transport, the same client the game uses.

use std::sync::Arc;
use std::time::Duration;

use ludolink::{AppState, ServerConfig, router};
use ludolink_client::{
    ClientError, HttpTransport, SyncClient, SyncTransport,
    generate_player_id,
};
use ludolink_protocol::{
    Cell, ClaimSeatRequest, GameState, Gender, PlayerId, PlayerState,
    RoomCode,
};

async fn spawn_server(admin_password: Option<&str>) -> String {
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        storage_path: None,
        room_expiry: Duration::from_secs(3600),
        admin_password: admin_password.map(String::from),
    };
    let state = AppState::from_config(&config).await.unwrap();
    let app = router(state);

    let listener =
        tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn two_player_state(a: &PlayerId, b: &PlayerId) -> GameState {
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
            id: a.clone(),
            name: "Alice".into(),
            gender: Gender::Male,
            position: 0,
            is_skipped: false,
            seat_index: 0,
        },
        PlayerState {
            id: b.clone(),
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
async fn test_sync_status_probe() {
    let base = spawn_server(None).await;
    let transport = HttpTransport::new(base).unwrap();
    let status = transport.sync_status().await.unwrap();
    assert!(status.sync_enabled);
}

#[tokio::test]
async fn test_full_two_client_session() {
    let base = spawn_server(None).await;
    let alice_id = generate_player_id();
    let bea_id = generate_player_id();

    let alice = SyncClient::create_room(
        Arc::new(HttpTransport::new(base.clone()).unwrap()),
        alice_id.clone(),
        GameState::empty(),
        1,
        1,
    )
    .await
    .unwrap();

    let bea = SyncClient::join_room(
        Arc::new(HttpTransport::new(base).unwrap()),
        bea_id.clone(),
        alice.room().clone(),
    )
    .await
    .unwrap();

    alice.claim_seat(0, "Alice").await.unwrap();
    let seats = bea.claim_seat(1, "Bea").await.unwrap();
    assert!(seats.is_full());

    // Alice starts the game and takes a turn.
    let mut state = two_player_state(&alice_id, &bea_id);
    ludolink_game::roll(&mut state, 4).unwrap();
    ludolink_game::complete_task(&mut state, None).unwrap();
    alice.push_state(state).await.unwrap();

    // Bea's next poll converges to the same state.
    assert!(bea.poll_once().await);
    let view = bea.view().await;
    assert_eq!(view.state.players[0].position, 4);
    assert_eq!(view.state.current_player_index, 1);
    assert!(bea.can_act().await);
}

#[tokio::test]
async fn test_join_missing_room_reports_not_exists() {
    let base = spawn_server(None).await;
    let transport = HttpTransport::new(base).unwrap();
    let resp = transport
        .join_room(&RoomCode::parse("ZZZZZZ").unwrap())
        .await
        .unwrap();
    assert!(!resp.exists);
    assert!(resp.state.is_none());
}

#[tokio::test]
async fn test_pull_unknown_room_is_not_found() {
    let base = spawn_server(None).await;
    let transport = HttpTransport::new(base).unwrap();
    let err = transport
        .pull(&RoomCode::parse("ZZZZZZ").unwrap(), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::RoomNotFound(_)));
}

#[tokio::test]
async fn test_malformed_room_code_is_bad_request() {
    let base = spawn_server(None).await;
    let resp = reqwest::get(format!("{base}/api/room?roomId=bad!"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_seat_conflict_is_conflict_status() {
    let base = spawn_server(None).await;
    let alice = SyncClient::create_room(
        Arc::new(HttpTransport::new(base.clone()).unwrap()),
        generate_player_id(),
        GameState::empty(),
        1,
        1,
    )
    .await
    .unwrap();
    let bea = SyncClient::join_room(
        Arc::new(HttpTransport::new(base).unwrap()),
        generate_player_id(),
        alice.room().clone(),
    )
    .await
    .unwrap();

    alice.claim_seat(0, "Alice").await.unwrap();
    let err = bea.claim_seat(0, "Bea").await.unwrap_err();
    assert!(matches!(err, ClientError::SeatTaken(0)));
}

#[tokio::test]
async fn test_claim_distinguishes_missing_seat_from_missing_room() {
    let base = spawn_server(None).await;
    let transport = Arc::new(HttpTransport::new(base).unwrap());
    let alice = SyncClient::create_room(
        Arc::clone(&transport),
        generate_player_id(),
        GameState::empty(),
        1,
        1,
    )
    .await
    .unwrap();

    // Out-of-range seat in an existing room.
    let err = alice.claim_seat(9, "Alice").await.unwrap_err();
    assert!(matches!(err, ClientError::SeatNotFound(9)));

    // Same claim against a room that never existed reports the room.
    let err = transport
        .claim_seat(&ClaimSeatRequest {
            room_id: RoomCode::parse("ZZZZZZ").unwrap(),
            seat_index: 0,
            player_id: generate_player_id(),
            player_name: "Alice".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::RoomNotFound(_)));
}

#[tokio::test]
async fn test_default_config_password_gate() {
    let base = spawn_server(Some("sesame")).await;
    let http = reqwest::Client::new();

    // Nothing saved yet.
    let resp: serde_json::Value = http
        .get(format!("{base}/api/default-config"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp["success"], false);

    // Wrong password.
    let resp = http
        .post(format!("{base}/api/default-config"))
        .json(&serde_json::json!({
            "password": "guess",
            "config": { "boardSize": 48 }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    // Right password saves; the config comes back on GET.
    let resp = http
        .post(format!("{base}/api/default-config"))
        .json(&serde_json::json!({
            "password": "sesame",
            "config": { "boardSize": 48 }
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let resp: serde_json::Value = http
        .get(format!("{base}/api/default-config"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp["success"], true);
    assert_eq!(resp["config"]["boardSize"], 48);
}

#[tokio::test]
async fn test_default_config_disabled_without_password() {
    let base = spawn_server(None).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/default-config"))
        .json(&serde_json::json!({
            "password": "anything",
            "config": {}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
}
