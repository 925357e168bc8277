//! Rabbit Game - grid rabbit-and-carrot game with firework celebrations
//!
//! Core modules:
//! - `sim`: Deterministic discrete simulation (movement, collisions, food)
//! - `fireworks`: Continuous-time particle celebration effect
//! - `clock`: Fixed-period and per-frame update sources
//! - `game`: Phase state machine tying simulation, effects and clocks together
//! - `snapshot`: Immutable per-frame view handed to a renderer
//! - `settings`: Data-driven game tuning
//! - `session`: Score, progress counters and session high score
//! - `input`: Key names to direction intents
//! - `autopilot`: Idle/demo mode steering

pub mod autopilot;
pub mod clock;
pub mod fireworks;
pub mod game;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::Game;
pub use session::{Scoreboard, Session};
pub use settings::{FireworkTuning, Settings, SettingsError};
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Grid side length in cells
    pub const GRID_SIZE: i32 = 20;
    /// Smallest grid where the first food does not start under the creature
    pub const MIN_GRID_SIZE: i32 = 3;
    /// Largest accepted grid (keeps cell arithmetic well inside i32)
    pub const MAX_GRID_SIZE: i32 = 1024;
    /// Cell size in pixels (play field is GRID_SIZE * CELL_SIZE square)
    pub const CELL_SIZE: f32 = 20.0;

    /// Creature movement period (ms per tick)
    pub const TICK_PERIOD_MS: f64 = 200.0;
    /// Maximum creature ticks run inside a single frame
    pub const MAX_TICKS_PER_FRAME: u32 = 4;
    /// Frame deltas above this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT_MS: f64 = 1000.0;

    /// Score awarded per food eaten
    pub const FOOD_REWARD: u64 = 10;
    /// Every Nth food eaten triggers a firework burst
    pub const FOODS_PER_TRIGGER: u32 = 3;
    /// Random placements tried before falling back to a grid scan
    pub const FOOD_SPAWN_ATTEMPTS: u32 = 64;

    /// Firework cap per trigger
    pub const MAX_FIREWORKS: u32 = 20;

    /// Firework palette (hex RGB)
    pub const PALETTE: [&str; 15] = [
        "#ff6b6b", "#ffd93d", "#6bcb77", "#4d96ff", "#ff6b9d", "#c44569", "#f8b739", "#32e0c4",
        "#7bed9f", "#70a1ff", "#e056fd", "#ff7f50", "#2ed573", "#ffa502", "#3742fa",
    ];
}
