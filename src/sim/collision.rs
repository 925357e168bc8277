//! Collision detection for grid movement
//!
//! Pure predicates: nothing here mutates state.

use serde::{Deserialize, Serialize};

use super::state::{Creature, Position};

/// Kind of terminal collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Head left the grid
    Wall,
    /// Head ran into its own body
    SelfHit,
}

/// Check a proposed head cell against the grid bounds and current body
///
/// The current head is skipped in the self check since it is the segment
/// being replaced. The tail still counts: it has not moved yet.
pub fn check_collision(head: Position, body: &Creature, grid_size: i32) -> Option<Collision> {
    if !head.in_bounds(grid_size) {
        return Some(Collision::Wall);
    }
    if body.segments().skip(1).any(|segment| segment == head) {
        return Some(Collision::SelfHit);
    }
    None
}
