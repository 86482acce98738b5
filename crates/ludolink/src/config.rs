//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_EXPIRY_HOURS: u64 = 24;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Path for the JSON room store. `None` keeps rooms in memory only.
    pub storage_path: Option<PathBuf>,
    /// How long an untouched room survives the expiry sweep.
    pub room_expiry: Duration,
    /// Admin password for saving the default board config. `None`
    /// disables that endpoint entirely.
    pub admin_password: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address {0:?}")]
    InvalidBindAddr(String),
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.parse().unwrap_or_else(|_| {
                SocketAddr::from(([0, 0, 0, 0], 3000))
            }),
            storage_path: None,
            room_expiry: Duration::from_secs(DEFAULT_EXPIRY_HOURS * 3600),
            admin_password: None,
        }
    }
}

impl ServerConfig {
    /// Reads `LUDOLINK_ADDR`, `LUDOLINK_STORAGE`, `ROOM_EXPIRY_HOURS`
    /// and `LUDOLINK_ADMIN_PASSWORD`. Every variable is optional; an
    /// unparsable expiry falls back to the default with a warning, an
    /// unparsable bind address is a startup error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = match std::env::var("LUDOLINK_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr(raw))?,
            Err(_) => defaults.bind_addr,
        };

        let storage_path =
            std::env::var("LUDOLINK_STORAGE").ok().map(PathBuf::from);

        let room_expiry = match std::env::var("ROOM_EXPIRY_HOURS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(hours) => Duration::from_secs(hours * 3600),
                Err(_) => {
                    tracing::warn!(
                        value = %raw,
                        "unparsable ROOM_EXPIRY_HOURS, using default"
                    );
                    defaults.room_expiry
                }
            },
            Err(_) => defaults.room_expiry,
        };

        let admin_password = std::env::var("LUDOLINK_ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        Ok(Self {
            bind_addr,
            storage_path,
            room_expiry,
            admin_password,
        })
    }
}
