//! The transport seam between the sync client and the server.
//!
//! [`SyncTransport`] is the request/response surface the client polls
//! over; [`HttpTransport`] is the production implementation speaking to
//! the Ludolink HTTP endpoints. Tests substitute an in-process
//! implementation that calls the room service directly.

use std::time::Duration;

use ludolink_protocol::{
    ClaimSeatRequest, CreateRoomRequest, CreateRoomResponse, ErrorBody,
    JoinResponse, PullResponse, PushRequest, PushResponse, RoomCode,
    SeatResponse, SyncStatusResponse,
};
use serde::de::DeserializeOwned;

use crate::ClientError;

/// Request timeout. Well above the poll interval so a slow server
/// degrades to missed polls rather than piled-up requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The request/response surface the sync client runs against.
pub trait SyncTransport: Send + Sync {
    /// The capability probe: does this deployment support sync at all?
    async fn sync_status(&self)
    -> Result<SyncStatusResponse, ClientError>;

    async fn create_room(
        &self,
        req: &CreateRoomRequest,
    ) -> Result<CreateRoomResponse, ClientError>;

    async fn join_room(
        &self,
        room: &RoomCode,
    ) -> Result<JoinResponse, ClientError>;

    async fn claim_seat(
        &self,
        req: &ClaimSeatRequest,
    ) -> Result<SeatResponse, ClientError>;

    async fn pull(
        &self,
        room: &RoomCode,
        since: u64,
    ) -> Result<PullResponse, ClientError>;

    async fn push(
        &self,
        req: &PushRequest,
    ) -> Result<PushResponse, ClientError>;
}

/// HTTP transport over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport for a server base URL such as
    /// `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decodes a 2xx body, or turns a non-2xx response into
    /// [`ClientError::Rejected`] with the server's error message.
    async fn decode<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

impl SyncTransport for HttpTransport {
    async fn sync_status(
        &self,
    ) -> Result<SyncStatusResponse, ClientError> {
        let resp =
            self.http.get(self.url("/api/sync-status")).send().await?;
        Self::decode(resp).await
    }

    async fn create_room(
        &self,
        req: &CreateRoomRequest,
    ) -> Result<CreateRoomResponse, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/room"))
            .json(req)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn join_room(
        &self,
        room: &RoomCode,
    ) -> Result<JoinResponse, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/room"))
            .query(&[("roomId", room.as_str())])
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn claim_seat(
        &self,
        req: &ClaimSeatRequest,
    ) -> Result<SeatResponse, ClientError> {
        let resp = self
            .http
            .patch(self.url("/api/room"))
            .json(req)
            .send()
            .await?;
        Self::decode(resp).await.map_err(|e| match e {
            ClientError::Rejected { status: 409, .. } => {
                ClientError::SeatTaken(req.seat_index)
            }
            // 404 covers both a missing room and a missing seat; the
            // server's message names the seat in the latter case.
            ClientError::Rejected { status: 404, message }
                if message.contains("seat") =>
            {
                ClientError::SeatNotFound(req.seat_index)
            }
            ClientError::Rejected { status: 404, .. } => {
                ClientError::RoomNotFound(req.room_id.clone())
            }
            other => other,
        })
    }

    async fn pull(
        &self,
        room: &RoomCode,
        since: u64,
    ) -> Result<PullResponse, ClientError> {
        let resp = self
            .http
            .get(self.url("/api/game-sync"))
            .query(&[
                ("roomId", room.as_str()),
                ("lastUpdate", &since.to_string()),
            ])
            .send()
            .await?;
        Self::decode(resp).await.map_err(|e| match e {
            ClientError::Rejected { status: 404, .. } => {
                ClientError::RoomNotFound(room.clone())
            }
            other => other,
        })
    }

    async fn push(
        &self,
        req: &PushRequest,
    ) -> Result<PushResponse, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/game-sync"))
            .json(req)
            .send()
            .await?;
        Self::decode(resp).await.map_err(|e| match e {
            ClientError::Rejected { status: 404, .. } => {
                ClientError::RoomNotFound(req.room_id.clone())
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let transport =
            HttpTransport::new("http://localhost:3000/").unwrap();
        assert_eq!(
            transport.url("/api/room"),
            "http://localhost:3000/api/room"
        );
    }
}
