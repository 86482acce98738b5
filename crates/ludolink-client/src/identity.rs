//! Player identity tokens.

use ludolink_protocol::PlayerId;
use rand::Rng;

/// Generates a fresh player identity: a random 32-character hex string
/// (128 bits). Issued client-side once per device and carried for the
/// room's lifetime; the server treats it as opaque.
pub fn generate_player_id() -> PlayerId {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    PlayerId(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_32_hex_chars() {
        let id = generate_player_id();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(generate_player_id(), generate_player_id());
    }
}
