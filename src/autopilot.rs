//! Idle/demo mode steering
//!
//! Greedy: among moves that survive the next tick, head for the food,
//! preferring cells with more room around them and keeping the current
//! facing on ties.

use std::cmp::Reverse;

use crate::sim::{Direction, GamePhase, GameState, Position, check_collision};

/// Pick a direction for the next tick, or None if every move collides
pub fn steer(state: &GameState) -> Option<Direction> {
    if state.phase != GamePhase::Playing {
        return None;
    }

    let facing = state.latch.facing();
    let head = state.creature.head();
    let grid = state.settings.grid_size;
    let is_safe = |cell: Position| check_collision(cell, &state.creature, grid).is_none();

    Direction::ALL
        .into_iter()
        .filter(|&dir| dir != facing.opposite())
        .filter(|&dir| is_safe(head.step(dir)))
        .min_by_key(|&dir| {
            let next = head.step(dir);
            let distance = state.food.map(|food| next.manhattan(food)).unwrap_or(0);
            let room = Direction::ALL
                .into_iter()
                .filter(|&d| next.step(d) != head && is_safe(next.step(d)))
                .count();
            (distance, Reverse(room), dir != facing)
        })
}
