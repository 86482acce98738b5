//! Identity types: room codes, player tokens, gender tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// The room code alphabet: 32 symbols, excluding glyphs that are easy to
/// misread over a shoulder or a voice call (`0/O`, `1/I`).
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of a room code. 32^6 ≈ 1.07 × 10^9 combinations.
pub const CODE_LEN: usize = 6;

/// A short, human-shareable room identifier.
///
/// Codes are case-insensitive at every boundary; the canonical form is
/// uppercase and that is the only form this type holds. Construct one
/// with [`RoomCode::parse`], which canonicalizes and validates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Canonicalizes user input to uppercase and validates it against
    /// the code alphabet.
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let canonical = input.trim().to_ascii_uppercase();
        if canonical.len() != CODE_LEN {
            return Err(ProtocolError::InvalidRoomCode(input.to_string()));
        }
        if !canonical.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
            return Err(ProtocolError::InvalidRoomCode(input.to_string()));
        }
        Ok(Self(canonical))
    }

    /// Builds a code from bytes already drawn from [`CODE_ALPHABET`].
    ///
    /// Used by the generator; panics are avoided by validating through
    /// the same path as user input.
    pub fn from_generated(raw: String) -> Result<Self, ProtocolError> {
        Self::parse(&raw)
    }

    /// The canonical uppercase code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RoomCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A client-issued player identity token.
///
/// Generated locally by each client (see `ludolink-client`), carried for
/// the room's lifetime, never persisted outside the room's state and
/// seat configuration. The server treats it as opaque.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat gender tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
        }
    }
}
