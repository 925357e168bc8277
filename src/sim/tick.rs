//! Fixed-period simulation tick
//!
//! One call advances the creature exactly one cell.

use serde::{Deserialize, Serialize};

use super::collision::{Collision, check_collision};
use super::food::spawn_food;
use super::state::{Creature, Direction, GameOutcome, GamePhase, GameState, Position};

/// Result of moving the creature one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved; length unchanged
    Moved,
    /// Moved onto the food; grew by one
    Ate,
    /// Would collide; body left untouched
    Collided(Collision),
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { at: Position, count: u32 },
    /// A celebration is due; `index` is the 0-based trigger number
    FireworksTriggered { index: u32 },
    FoodSpawned { at: Position },
    Collided(Collision),
    BoardFull,
}

/// Move the creature one cell in `facing`
///
/// On collision the body is not mutated. Eating keeps the tail so the
/// creature grows by exactly one segment.
pub fn advance(
    creature: &mut Creature,
    facing: Direction,
    food: Option<Position>,
    grid_size: i32,
) -> Step {
    let head = creature.head().step(facing);
    if let Some(collision) = check_collision(head, creature, grid_size) {
        return Step::Collided(collision);
    }

    let ate = food == Some(head);
    creature.push_head(head, ate);
    if ate { Step::Ate } else { Step::Moved }
}

/// Advance the game state by one creature tick
///
/// No-op unless playing. Returns the events raised, in order.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    let facing = state.latch.take();
    let grid = state.settings.grid_size;

    match advance(&mut state.creature, facing, state.food, grid) {
        Step::Moved => {}
        Step::Collided(collision) => {
            log::info!(
                "Collision ({:?}) at tick {} with length {}",
                collision,
                state.time_ticks,
                state.creature.len()
            );
            state.phase = GamePhase::GameOver;
            state.outcome = Some(GameOutcome::Collision(collision));
            events.push(GameEvent::Collided(collision));
        }
        Step::Ate => {
            let at = state.creature.head();
            let trigger = state
                .session
                .record_food(state.settings.food_reward, state.settings.foods_per_trigger);
            events.push(GameEvent::FoodEaten {
                at,
                count: state.session.food_eaten,
            });
            if let Some(index) = trigger {
                events.push(GameEvent::FireworksTriggered { index });
            }

            match spawn_food(
                &mut state.rng,
                &state.creature,
                grid,
                state.settings.food_spawn_attempts,
            ) {
                Ok(pos) => {
                    log::debug!("Food spawned at ({}, {})", pos.x, pos.y);
                    state.food = Some(pos);
                    events.push(GameEvent::FoodSpawned { at: pos });
                }
                Err(full) => {
                    log::warn!("{} - run complete with score {}", full, state.session.score);
                    state.food = None;
                    state.phase = GamePhase::GameOver;
                    state.outcome = Some(GameOutcome::BoardFull);
                    events.push(GameEvent::BoardFull);
                }
            }
        }
    }

    events
}
