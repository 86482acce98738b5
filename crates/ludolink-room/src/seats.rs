//! Seat allocation.
//!
//! A player holds at most one seat per room. Claiming a new seat frees
//! any seat they held before, so switching is a single operation and the
//! one-seat invariant never breaks mid-flight.

use ludolink_protocol::{PlayerId, SeatConfig};

/// Why a claim was refused. The service layer attaches the room code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimError {
    SeatNotFound,
    SeatTaken,
}

/// Assigns `seat_index` to `player`, releasing any seat they already
/// hold. Fails without touching the config if the seat does not exist
/// or someone else holds it.
pub fn claim(
    config: &mut SeatConfig,
    seat_index: usize,
    player: &PlayerId,
    player_name: &str,
) -> Result<(), ClaimError> {
    let pos = config
        .seats
        .iter()
        .position(|s| s.index == seat_index)
        .ok_or(ClaimError::SeatNotFound)?;
    if config.seats[pos].taken_by_other(player) {
        return Err(ClaimError::SeatTaken);
    }

    for seat in &mut config.seats {
        if seat.player_id.as_ref() == Some(player) {
            seat.player_id = None;
            seat.player_name = None;
        }
    }
    let seat = &mut config.seats[pos];
    seat.player_id = Some(player.clone());
    seat.player_name = Some(player_name.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PlayerId {
        PlayerId(s.into())
    }

    #[test]
    fn test_claim_empty_seat_assigns_player() {
        let mut config = SeatConfig::build(1, 1);
        claim(&mut config, 0, &pid("p1"), "Alice").unwrap();
        assert_eq!(config.seats[0].player_id, Some(pid("p1")));
        assert_eq!(config.seats[0].player_name.as_deref(), Some("Alice"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_claim_taken_seat_is_refused_and_holder_kept() {
        let mut config = SeatConfig::build(1, 1);
        claim(&mut config, 0, &pid("p1"), "Alice").unwrap();

        let err = claim(&mut config, 0, &pid("p2"), "Bob").unwrap_err();
        assert_eq!(err, ClaimError::SeatTaken);
        assert_eq!(config.seats[0].player_id, Some(pid("p1")));
    }

    #[test]
    fn test_claim_moves_player_and_frees_previous_seat() {
        let mut config = SeatConfig::build(1, 1);
        claim(&mut config, 0, &pid("p1"), "Alice").unwrap();
        claim(&mut config, 1, &pid("p1"), "Alice").unwrap();

        assert!(config.seats[0].player_id.is_none());
        assert_eq!(config.seats[1].player_id, Some(pid("p1")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reclaiming_own_seat_updates_name() {
        let mut config = SeatConfig::build(1, 0);
        claim(&mut config, 0, &pid("p1"), "Alice").unwrap();
        claim(&mut config, 0, &pid("p1"), "Alicia").unwrap();
        assert_eq!(config.seats[0].player_name.as_deref(), Some("Alicia"));
    }

    #[test]
    fn test_claim_unknown_seat_index() {
        let mut config = SeatConfig::build(1, 1);
        let err = claim(&mut config, 5, &pid("p1"), "Alice").unwrap_err();
        assert_eq!(err, ClaimError::SeatNotFound);
    }

    #[test]
    fn test_full_room_after_all_claims() {
        let mut config = SeatConfig::build(2, 1);
        claim(&mut config, 0, &pid("p1"), "A").unwrap();
        claim(&mut config, 1, &pid("p2"), "B").unwrap();
        assert!(!config.is_full());
        claim(&mut config, 2, &pid("p3"), "C").unwrap();
        assert!(config.is_full());
    }
}
