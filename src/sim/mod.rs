//! Deterministic simulation module
//!
//! All creature gameplay lives here. This module must be pure and deterministic:
//! - Discrete ticks only
//! - Seeded RNG only
//! - No rendering, effects or platform dependencies

pub mod collision;
pub mod food;
pub mod state;
pub mod tick;

pub use collision::{Collision, check_collision};
pub use food::{BoardFull, spawn_food};
pub use state::{
    Creature, Direction, DirectionLatch, EmptyCreature, GameOutcome, GamePhase, GameState, Position,
    first_food_position, start_position,
};
pub use tick::{GameEvent, Step, advance, tick};
