//! Room code generation.

use ludolink_protocol::{CODE_ALPHABET, CODE_LEN, RoomCode};
use ludolink_store::RoomStore;
use rand::Rng;

use crate::RoomError;

/// How many collisions the allocator tolerates before giving up. With
/// 32^6 possible codes a tenth consecutive collision means the store is
/// effectively saturated (or the RNG is broken).
pub const MAX_CODE_ATTEMPTS: u32 = 10;

/// Draws one uniformly random code from the alphabet.
pub fn generate(rng: &mut impl Rng) -> Result<RoomCode, RoomError> {
    let raw: String = (0..CODE_LEN)
        .map(|_| {
            CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char
        })
        .collect();
    Ok(RoomCode::from_generated(raw)?)
}

/// Allocates a code not currently present in `store`, retrying on
/// collision up to [`MAX_CODE_ATTEMPTS`] times.
///
/// Existence is checked before the caller creates the room; the tiny
/// check-then-create window is acceptable for codes drawn from a
/// billion-entry space.
pub async fn create_unique<S: RoomStore>(
    store: &S,
) -> Result<RoomCode, RoomError> {
    for attempt in 0..MAX_CODE_ATTEMPTS {
        let code = generate(&mut rand::rng())?;
        if !store.exists(&code).await? {
            return Ok(code);
        }
        tracing::debug!(room = %code, attempt, "room code collision");
    }
    Err(RoomError::CodesExhausted(MAX_CODE_ATTEMPTS))
}
