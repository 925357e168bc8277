//! Keyboard intent mapping
//!
//! Hosts pass raw key names (DOM `KeyboardEvent.key` style); anything that is
//! not a direction is ignored.

use crate::sim::Direction;

/// Map a key name to a direction intent
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}
