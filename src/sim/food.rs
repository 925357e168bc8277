//! Food placement
//!
//! Bounded rejection sampling, then a deterministic scan for the first free
//! cell. Always terminates; a completely occupied grid yields `BoardFull`.

use rand::Rng;
use thiserror::Error;

use super::state::{Creature, Position};

/// No free cell left on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free cell left for food")]
pub struct BoardFull;

/// Pick a food cell not occupied by `creature`
pub fn spawn_food<R: Rng>(
    rng: &mut R,
    creature: &Creature,
    grid_size: i32,
    max_attempts: u32,
) -> Result<Position, BoardFull> {
    let cells = (grid_size as usize) * (grid_size as usize);
    if creature.len() >= cells {
        return Err(BoardFull);
    }

    for _ in 0..max_attempts {
        let candidate = Position::new(
            rng.random_range(0..grid_size),
            rng.random_range(0..grid_size),
        );
        if !creature.contains(candidate) {
            return Ok(candidate);
        }
    }

    log::debug!(
        "Food sampling missed {} times ({} of {} cells occupied), scanning",
        max_attempts,
        creature.len(),
        cells
    );
    (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
        .find(|&cell| !creature.contains(cell))
        .ok_or(BoardFull)
}
