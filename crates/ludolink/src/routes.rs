//! HTTP handlers and the error-to-status mapping.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ludolink_protocol::{
    ClaimSeatRequest, CreateRoomRequest, CreateRoomResponse,
    DefaultConfigRequest, DefaultConfigResponse, ErrorBody, JoinResponse,
    ProtocolError, PullResponse, PushRequest, PushResponse, RoomCode,
    SeatResponse, SyncStatusResponse,
};
use ludolink_room::RoomError;
use ludolink_store::{ConfigStore, StoreError};
use serde::Deserialize;

use crate::AppState;

/// A handler failure carrying the HTTP status it maps to. The body is
/// always a uniform `{ "error": ... }` document.
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn forbidden(message: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.to_string(),
        }
    }
}

impl From<RoomError> for ApiError {
    fn from(e: RoomError) -> Self {
        let status = match &e {
            RoomError::NotFound(_) | RoomError::SeatNotFound(..) => {
                StatusCode::NOT_FOUND
            }
            RoomError::SeatTaken(..) => StatusCode::CONFLICT,
            RoomError::Protocol(_) => StatusCode::BAD_REQUEST,
            RoomError::CodesExhausted(_) | RoomError::Store(_) => {
                tracing::error!(error = %e, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<ProtocolError> for ApiError {
    fn from(e: ProtocolError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "storage failure");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomQuery {
    room_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullQuery {
    room_id: String,
    #[serde(default)]
    last_update: u64,
}

/// `GET /api/sync-status` — the capability probe. Its mere reachability
/// is the signal; a deployment without this server simply has no route.
pub(crate) async fn sync_status() -> Json<SyncStatusResponse> {
    Json(SyncStatusResponse {
        sync_enabled: true,
        message: "multiplayer sync available".into(),
    })
}

/// `POST /api/room` — create a room.
pub(crate) async fn create_room(
    State(app): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, ApiError> {
    let (room_id, seats) = app
        .rooms
        .create_room(req.state, req.male_count, req.female_count)
        .await?;
    Ok(Json(CreateRoomResponse { room_id, seats }))
}

/// `GET /api/room?roomId=` — look up a room. A missing room is a 200
/// with `exists: false`, so the join screen can say "no such room"
/// without treating it as a transport failure.
pub(crate) async fn join_room(
    State(app): State<AppState>,
    Query(q): Query<RoomQuery>,
) -> Result<Json<JoinResponse>, ApiError> {
    let code = RoomCode::parse(&q.room_id)?;
    let resp = match app.rooms.join_room(&code).await? {
        Some(record) => JoinResponse {
            exists: true,
            state: Some(record.state),
            seats: record.seats,
        },
        None => JoinResponse {
            exists: false,
            state: None,
            seats: None,
        },
    };
    Ok(Json(resp))
}

/// `PATCH /api/room` — claim a seat. 409 on conflict.
pub(crate) async fn claim_seat(
    State(app): State<AppState>,
    Json(req): Json<ClaimSeatRequest>,
) -> Result<Json<SeatResponse>, ApiError> {
    let seats = app
        .rooms
        .claim_seat(
            &req.room_id,
            req.seat_index,
            &req.player_id,
            &req.player_name,
        )
        .await?;
    Ok(Json(SeatResponse { seats }))
}

/// `GET /api/game-sync?roomId=&lastUpdate=` — one poll.
pub(crate) async fn pull(
    State(app): State<AppState>,
    Query(q): Query<PullQuery>,
) -> Result<Json<PullResponse>, ApiError> {
    let code = RoomCode::parse(&q.room_id)?;
    let pull = app.rooms.pull(&code, q.last_update).await?;
    Ok(Json(PullResponse {
        updated: pull.updated,
        state: pull.state,
        seats: pull.seats,
    }))
}

/// `POST /api/game-sync` — accept a snapshot push.
pub(crate) async fn push(
    State(app): State<AppState>,
    Json(req): Json<PushRequest>,
) -> Result<Json<PushResponse>, ApiError> {
    let last_update = app.rooms.push(&req.room_id, req.state).await?;
    Ok(Json(PushResponse {
        success: true,
        last_update,
    }))
}

/// `GET /api/default-config` — the saved default board config, if any.
pub(crate) async fn get_default_config(
    State(app): State<AppState>,
) -> Result<Json<DefaultConfigResponse>, ApiError> {
    let config = app.store.get_default().await?;
    Ok(Json(DefaultConfigResponse {
        success: config.is_some(),
        config,
    }))
}

/// `POST /api/default-config` — save the default board config.
///
/// Gated by exact password match against the configured admin password;
/// with no password configured the endpoint is disabled outright.
pub(crate) async fn set_default_config(
    State(app): State<AppState>,
    Json(req): Json<DefaultConfigRequest>,
) -> Result<Json<DefaultConfigResponse>, ApiError> {
    let Some(expected) = app.admin_password.as_deref() else {
        return Err(ApiError::forbidden(
            "default-config administration is disabled",
        ));
    };
    if req.password != expected {
        tracing::warn!("default-config save rejected: wrong password");
        return Err(ApiError::forbidden("wrong password"));
    }
    app.store.set_default(req.config).await?;
    Ok(Json(DefaultConfigResponse {
        success: true,
        config: None,
    }))
}
