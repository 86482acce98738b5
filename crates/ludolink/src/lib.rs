//! The Ludolink sync server: a small HTTP API that lets board-game
//! clients share a room's state by polling.
//!
//! Endpoints:
//!
//! | Method | Path                  | Purpose                       |
//! |--------|-----------------------|-------------------------------|
//! | GET    | `/api/sync-status`    | capability probe              |
//! | POST   | `/api/room`           | create a room                 |
//! | GET    | `/api/room`           | look up a room by code        |
//! | PATCH  | `/api/room`           | claim a seat                  |
//! | GET    | `/api/game-sync`      | pull (one poll)               |
//! | POST   | `/api/game-sync`      | push a snapshot               |
//! | GET    | `/api/default-config` | saved default board config    |
//! | POST   | `/api/default-config` | save it (admin password)      |

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use ludolink_room::RoomService;
use ludolink_store::{Backend, StoreError};

pub mod config;
mod routes;

pub use config::{ConfigError, ServerConfig};

/// Shared handler state: the room service plus direct store access for
/// the default-config endpoints.
#[derive(Clone)]
pub struct AppState {
    pub(crate) rooms: RoomService<Backend>,
    pub(crate) store: Arc<Backend>,
    pub(crate) admin_password: Option<String>,
}

impl AppState {
    /// Opens the configured storage backend and wires up the services.
    pub async fn from_config(
        config: &ServerConfig,
    ) -> Result<Self, StoreError> {
        let store =
            Arc::new(Backend::open(config.storage_path.clone()).await?);
        Ok(Self {
            rooms: RoomService::with_expiry(
                Arc::clone(&store),
                config.room_expiry,
            ),
            store,
            admin_password: config.admin_password.clone(),
        })
    }
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/sync-status", get(routes::sync_status))
        .route(
            "/api/room",
            get(routes::join_room)
                .post(routes::create_room)
                .patch(routes::claim_seat),
        )
        .route(
            "/api/game-sync",
            get(routes::pull).post(routes::push),
        )
        .route(
            "/api/default-config",
            get(routes::get_default_config)
                .post(routes::set_default_config),
        )
        .with_state(state)
}
