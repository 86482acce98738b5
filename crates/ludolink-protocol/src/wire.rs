//! Request and response bodies for the HTTP endpoints.
//!
//! One type per endpoint direction, camelCase on the wire. Query-string
//! parameters (`roomId`, `lastUpdate`) are declared at the server layer;
//! everything body-shaped lives here so client and server agree by
//! construction.

use serde::{Deserialize, Serialize};

use crate::{GameState, PlayerId, RoomCode, SeatConfig};

/// `POST /api/room` — create a room.
///
/// The initial state is supplied by the creating client; seat counts
/// default to one male and one female seat (the two-player case).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub state: GameState,
    #[serde(default = "default_seat_count")]
    pub male_count: usize,
    #[serde(default = "default_seat_count")]
    pub female_count: usize,
}

fn default_seat_count() -> usize {
    1
}

/// `POST /api/room` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: RoomCode,
    pub seats: SeatConfig,
}

/// `GET /api/room?roomId=` response: existence plus current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<GameState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<SeatConfig>,
}

/// `PATCH /api/room` — claim a seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSeatRequest {
    pub room_id: RoomCode,
    pub seat_index: usize,
    pub player_id: PlayerId,
    pub player_name: String,
}

/// Seat-claim response: the updated seat layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatResponse {
    pub seats: SeatConfig,
}

/// `GET /api/game-sync?roomId=&lastUpdate=` response.
///
/// `updated` is false when the stored version does not exceed the
/// client's last-seen stamp, so clients can skip re-applying identical
/// state. State and seats are included either way — a late joiner
/// seeds itself from the same response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullResponse {
    pub updated: bool,
    pub state: GameState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<SeatConfig>,
}

/// `POST /api/game-sync` — push a whole-state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    pub room_id: RoomCode,
    pub state: GameState,
}

/// Push response: the server-assigned version stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResponse {
    pub success: bool,
    pub last_update: u64,
}

/// `GET /api/sync-status` — the capability probe clients call once at
/// startup to decide whether to offer multiplayer at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusResponse {
    pub sync_enabled: bool,
    pub message: String,
}

/// `POST /api/default-config` — admin-gated default board config.
///
/// The config document is opaque to the sync core: its shape belongs
/// to the external board generator. Password comparison is exact
/// string equality, server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultConfigRequest {
    pub password: String,
    pub config: serde_json::Value,
}

/// `GET /api/default-config` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultConfigResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

/// Uniform error body for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_room_request_defaults_seat_counts() {
        let json = r#"{"state":{"players":[],"currentPlayerIndex":0,
            "canRollAgain":false,"winner":null,"cells":[],
            "endpointCells":[]}}"#;
        let req: CreateRoomRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.male_count, 1);
        assert_eq!(req.female_count, 1);
        assert!(req.state.players.is_empty());
    }

    #[test]
    fn test_pull_response_wire_shape() {
        let resp = PullResponse {
            updated: false,
            state: GameState::empty(),
            seats: None,
        };
        let json: serde_json::Value =
            serde_json::to_value(&resp).unwrap();
        assert_eq!(json["updated"], false);
        assert!(json.get("seats").is_none());
    }

    #[test]
    fn test_push_request_round_trip() {
        let req = PushRequest {
            room_id: RoomCode::parse("ABCDEF").unwrap(),
            state: GameState::empty(),
        };
        let bytes = serde_json::to_vec(&req).unwrap();
        let decoded: PushRequest =
            serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded.room_id.as_str(), "ABCDEF");
    }

    #[test]
    fn test_claim_seat_request_camel_case() {
        let req = ClaimSeatRequest {
            room_id: RoomCode::parse("ABCDEF").unwrap(),
            seat_index: 1,
            player_id: PlayerId("tok".into()),
            player_name: "Alice".into(),
        };
        let json: serde_json::Value =
            serde_json::to_value(&req).unwrap();
        assert_eq!(json["roomId"], "ABCDEF");
        assert_eq!(json["seatIndex"], 1);
        assert_eq!(json["playerId"], "tok");
        assert_eq!(json["playerName"], "Alice");
    }
}
