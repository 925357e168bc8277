//! Game state and core simulation types
//!
//! Everything the discrete creature clock mutates lives here. Firework state
//! is owned separately by `crate::fireworks`.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::Collision;
use super::food::spawn_food;
use crate::session::Session;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended (state frozen for display)
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Hit a wall or itself
    Collision(Collision),
    /// Player ended the run
    Stopped,
    /// No free cell left for food
    BoardFull,
}

/// A grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `dir` (may fall outside the grid)
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Facing direction. Screen coordinates: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A creature needs at least one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("creature needs at least one segment")]
pub struct EmptyCreature;

/// The creature: segments head first
///
/// Serializes as a plain list of cells; deserializing an empty list fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct Creature {
    body: VecDeque<Position>,
}

impl Creature {
    /// Single-segment creature at `head`
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build from explicit segments (head first). Returns None if empty.
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() { None } else { Some(Self { body }) }
    }

    pub fn head(&self) -> Position {
        // Never empty: constructors require at least one segment
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move the head to `head`; keep the tail when growing
    pub(crate) fn push_head(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            self.body.pop_back();
        }
    }
}

impl TryFrom<Vec<Position>> for Creature {
    type Error = EmptyCreature;

    fn try_from(segments: Vec<Position>) -> Result<Self, Self::Error> {
        Self::from_segments(segments).ok_or(EmptyCreature)
    }
}

impl From<Creature> for Vec<Position> {
    fn from(creature: Creature) -> Self {
        creature.body.into()
    }
}

/// Latched direction intent
///
/// Input lands in `pending`; the tick consumes it exactly once. Reversal is
/// judged against the facing the last tick actually moved in, so several
/// presses between ticks can never sneak in a reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionLatch {
    facing: Direction,
    pending: Option<Direction>,
}

impl DirectionLatch {
    pub fn new(facing: Direction) -> Self {
        Self {
            facing,
            pending: None,
        }
    }

    /// Direction the creature last moved (or starts) in
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Direction the next tick will use
    pub fn next(&self) -> Direction {
        self.pending.unwrap_or(self.facing)
    }

    /// Request a turn. Returns false (no-op) for the reverse of `facing`.
    pub fn request(&mut self, dir: Direction) -> bool {
        if dir == self.facing.opposite() {
            return false;
        }
        self.pending = Some(dir);
        true
    }

    /// Consume the latched intent for one tick
    pub(crate) fn take(&mut self) -> Direction {
        if let Some(dir) = self.pending.take() {
            self.facing = dir;
        }
        self.facing
    }
}

/// Complete discrete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Set when the run ends
    pub outcome: Option<GameOutcome>,
    pub creature: Creature,
    /// None only once the board is full
    pub food: Option<Position>,
    pub latch: DirectionLatch,
    pub session: Session,
    /// Creature ticks this run
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an idle state with the given seed
    pub fn new(seed: u64, settings: Settings) -> Self {
        let head = start_position(settings.grid_size);
        let mut state = Self {
            seed,
            phase: GamePhase::Idle,
            outcome: None,
            creature: Creature::new(head),
            food: None,
            latch: DirectionLatch::new(Direction::Right),
            session: Session::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            settings,
        };
        state.food = state.opening_food();
        state
    }

    /// Reset creature, food, direction and run counters; keeps high score
    pub fn reset_run(&mut self) {
        let grid = self.settings.grid_size;
        self.creature = Creature::new(start_position(grid));
        self.food = self.opening_food();
        self.latch = DirectionLatch::new(Direction::Right);
        self.session.reset_run();
        self.outcome = None;
        self.time_ticks = 0;
    }

    /// Fixed first-food cell, or a spawned one when the creature covers it
    /// (only possible with unvalidated tiny grids)
    fn opening_food(&mut self) -> Option<Position> {
        let grid = self.settings.grid_size;
        let fixed = first_food_position(grid);
        if !self.creature.contains(fixed) {
            return Some(fixed);
        }
        spawn_food(
            &mut self.rng,
            &self.creature,
            grid,
            self.settings.food_spawn_attempts,
        )
        .ok()
    }
}

/// Creature start cell: grid centre
pub fn start_position(grid_size: i32) -> Position {
    Position::new(grid_size / 2, grid_size / 2)
}

/// First food of every run sits at three quarters across and down
pub fn first_food_position(grid_size: i32) -> Position {
    Position::new(grid_size * 3 / 4, grid_size * 3 / 4)
}
