//! Immutable per-frame view for renderers
//!
//! Everything is copied out of the game, so a renderer can hold a snapshot
//! for as long as it likes without seeing later mutation.

use serde::Serialize;

use crate::game::Game;
use crate::session::Scoreboard;
use crate::sim::{Direction, GameOutcome, GamePhase, Position};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    /// Palette index
    pub color: usize,
    /// life / max_life
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireworkView {
    pub x: f32,
    pub y: f32,
    pub color: usize,
    pub exploded: bool,
    pub particles: Vec<ParticleView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub outcome: Option<GameOutcome>,
    /// Head first
    pub creature: Vec<Position>,
    pub facing: Direction,
    pub food: Option<Position>,
    pub fireworks: Vec<FireworkView>,
    pub scoreboard: Scoreboard,
    pub palette: Vec<String>,
    pub grid_size: i32,
    pub cell_size: f32,
    /// Play field side in pixels
    pub field_size: f32,
}

impl Snapshot {
    pub fn capture(game: &Game) -> Self {
        let state = game.state();
        let settings = game.settings();

        let fireworks = game
            .fireworks()
            .fireworks()
            .iter()
            .map(|fw| FireworkView {
                x: fw.pos.x,
                y: fw.pos.y,
                color: fw.color,
                exploded: fw.exploded,
                particles: fw
                    .particles
                    .iter()
                    .map(|p| ParticleView {
                        x: p.pos.x,
                        y: p.pos.y,
                        color: p.color,
                        alpha: p.alpha(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            phase: state.phase,
            outcome: state.outcome,
            creature: state.creature.segments().collect(),
            facing: state.latch.facing(),
            food: state.food,
            fireworks,
            scoreboard: game.scoreboard(),
            palette: settings.palette.clone(),
            grid_size: settings.grid_size,
            cell_size: settings.cell_size,
            field_size: settings.field_size(),
        }
    }

    /// Serialize for non-Rust renderers
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn particle_count(&self) -> usize {
        self.fireworks.iter().map(|f| f.particles.len()).sum()
    }
}
