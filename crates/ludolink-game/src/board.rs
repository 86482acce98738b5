//! Board assembly: the shuffle seam between external cell content and
//! the synchronized state.
//!
//! Cell content and task tables live outside this crate. Callers hand
//! over their pools; this module only shuffles them into a track order
//! and rolls the die. Keeping the RNG a parameter makes both
//! deterministic under test.

use ludolink_protocol::Cell;
use rand::seq::SliceRandom;
use rand::Rng;

/// A shuffled board ready to install into a `GameState`.
#[derive(Debug, Clone)]
pub struct Board {
    pub cells: Vec<Cell>,
    pub endpoint_cells: Vec<Cell>,
}

impl Board {
    /// Shuffles both pools into a fresh track order.
    pub fn shuffled(
        mut cells: Vec<Cell>,
        mut endpoint_cells: Vec<Cell>,
        rng: &mut impl Rng,
    ) -> Self {
        cells.shuffle(rng);
        endpoint_cells.shuffle(rng);
        Self {
            cells,
            endpoint_cells,
        }
    }
}

/// A standard six-sided die roll.
pub fn roll_die(rng: &mut impl Rng) -> u8 {
    rng.random_range(1..=6)
}
