//! Game phase state machine
//!
//! Owns the two disjoint state slices (creature simulation and fireworks)
//! and the clocks that drive them. Hosts call `frame` once per display
//! refresh and forward input through `handle_key` / `steer`.

use crate::clock::{FixedClock, FrameClock};
use crate::consts::{MAX_FRAME_DT_MS, MAX_TICKS_PER_FRAME};
use crate::fireworks::FireworkSystem;
use crate::input::direction_for_key;
use crate::session::Scoreboard;
use crate::settings::Settings;
use crate::sim::{Direction, GameEvent, GameOutcome, GamePhase, GameState, tick};
use crate::snapshot::Snapshot;

/// Mixed into the run seed so effects draw from their own stream
const FX_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// A game session: state machine, simulation, effects and clocks
#[derive(Debug)]
pub struct Game {
    state: GameState,
    fireworks: FireworkSystem,
    tick_clock: FixedClock,
    frame_clock: FrameClock,
    last_frame_ms: Option<f64>,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        let fireworks = FireworkSystem::new(
            seed ^ FX_SEED_SALT,
            settings.fireworks.clone(),
            settings.field_size(),
            settings.palette.len(),
        );
        let tick_clock = FixedClock::new(settings.tick_period_ms, MAX_TICKS_PER_FRAME);
        Self {
            state: GameState::new(seed, settings),
            fireworks,
            tick_clock,
            frame_clock: FrameClock::default(),
            last_frame_ms: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Settings::default())
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that script a run
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn fireworks(&self) -> &FireworkSystem {
        &self.fireworks
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.state
            .session
            .scoreboard(self.state.settings.foods_per_trigger)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// True while the creature clock is scheduled
    pub fn is_ticking(&self) -> bool {
        self.tick_clock.is_running()
    }

    /// True while the per-frame effects clock is scheduled
    pub fn is_animating(&self) -> bool {
        self.frame_clock.is_armed()
    }

    /// idle -> playing
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            log::debug!("Ignoring start in {:?}", self.state.phase);
            return false;
        }
        self.enter_playing();
        true
    }

    /// gameOver -> playing
    pub fn restart(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            log::debug!("Ignoring restart in {:?}", self.state.phase);
            return false;
        }
        self.enter_playing();
        true
    }

    /// playing -> gameOver (player ended the run)
    pub fn stop(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            log::debug!("Ignoring stop in {:?}", self.state.phase);
            return false;
        }
        self.state.phase = GamePhase::GameOver;
        self.state.outcome = Some(GameOutcome::Stopped);
        self.end_run();
        true
    }

    /// Request a turn. Ignored unless playing; reversals are no-ops.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.state.latch.request(dir)
    }

    /// Forward a raw key name; non-direction keys are ignored
    pub fn handle_key(&mut self, key: &str) -> bool {
        match direction_for_key(key) {
            Some(dir) => self.steer(dir),
            None => false,
        }
    }

    /// Run one creature tick now and apply its side effects
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let events = tick(&mut self.state);
        for event in &events {
            match *event {
                GameEvent::FireworksTriggered { index } => {
                    self.fireworks.trigger(index);
                    self.frame_clock.arm();
                }
                GameEvent::Collided(_) | GameEvent::BoardFull => self.end_run(),
                GameEvent::FoodEaten { .. } | GameEvent::FoodSpawned { .. } => {}
            }
        }
        events
    }

    /// Advance fireworks by one frame if the effects clock is armed
    pub fn update_fireworks(&mut self) {
        if !self.frame_clock.frame() {
            return;
        }
        self.fireworks.update();
        if self.fireworks.is_empty() {
            self.frame_clock.disarm();
        }
    }

    /// Host frame callback (`now_ms` from the host's monotonic clock)
    ///
    /// Runs any creature ticks that fell due, then one effects update.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt = match self.last_frame_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_DT_MS),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        let mut events = Vec::new();
        let due = self.tick_clock.advance(dt);
        for _ in 0..due {
            events.extend(self.tick());
            if !self.tick_clock.is_running() {
                break;
            }
        }

        self.update_fireworks();
        events
    }

    /// Stop both clocks and drop effects (host teardown)
    pub fn shutdown(&mut self) {
        self.tick_clock.stop();
        self.frame_clock.disarm();
        self.fireworks.clear();
        self.last_frame_ms = None;
    }

    fn enter_playing(&mut self) {
        self.state.reset_run();
        self.fireworks.clear();
        self.frame_clock.disarm();
        self.state.phase = GamePhase::Playing;
        self.tick_clock.start();
        log::info!(
            "Run started (seed {}, high score {})",
            self.state.seed,
            self.state.session.high_score
        );
    }

    /// Leave playing: the creature clock stops now, the effects clock keeps
    /// running until the last particle fades.
    fn end_run(&mut self) {
        self.tick_clock.stop();
        if self.fireworks.is_empty() {
            self.frame_clock.disarm();
        }
        log::info!(
            "Run over ({:?}): score {}, food {}, triggers {}",
            self.state.outcome,
            self.state.session.score,
            self.state.session.food_eaten,
            self.state.session.trigger_count
        );
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Collision, Position};

    const FRAME_MS: f64 = 20.0;

    /// Put food directly in front of the head
    fn feed(game: &mut Game) {
        let state = game.state_mut();
        let next = state.creature.head().step(state.latch.next());
        state.food = Some(next);
    }

    #[test]
    fn test_phase_transitions() {
        let mut game = Game::with_seed(1);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(!game.restart());
        assert!(!game.stop());
        assert!(game.start());
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(!game.start());
        assert!(game.stop());
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.state().outcome, Some(GameOutcome::Stopped));
        assert!(!game.is_ticking());
        assert!(game.restart());
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().outcome, None);
    }

    #[test]
    fn test_input_ignored_unless_playing() {
        let mut game = Game::with_seed(1);
        assert!(!game.handle_key("ArrowUp"));
        game.start();
        assert!(!game.handle_key("ArrowLeft"));
        assert!(!game.handle_key("Escape"));
        assert!(game.handle_key("ArrowUp"));
        game.stop();
        assert!(!game.handle_key("ArrowDown"));
    }

    #[test]
    fn test_frames_drive_ticks() {
        let mut game = Game::with_seed(3);
        game.start();
        let mut now = 0.0;
        game.frame(now);
        for _ in 0..9 {
            now += FRAME_MS;
            game.frame(now);
        }
        assert_eq!(game.state().creature.head(), Position::new(10, 10));
        now += FRAME_MS;
        game.frame(now);
        assert_eq!(game.state().creature.head(), Position::new(11, 10));
    }

    #[test]
    fn test_idle_frames_do_not_tick() {
        let mut game = Game::with_seed(3);
        for i in 0..100 {
            game.frame(i as f64 * FRAME_MS);
        }
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn test_nine_foods_three_triggers() {
        let mut game = Game::with_seed(9);
        game.start();
        // Snake along rows so the body never blocks the next cell
        let mut triggered = Vec::new();
        for n in 1..=9 {
            if game.state().creature.head().x >= 18 {
                game.steer(Direction::Down);
            }
            feed(&mut game);
            for event in game.tick() {
                if let GameEvent::FireworksTriggered { index } = event {
                    triggered.push((n, index));
                }
            }
            assert_eq!(game.phase(), GamePhase::Playing);
        }
        assert_eq!(triggered, vec![(3, 0), (6, 1), (9, 2)]);
        assert_eq!(game.scoreboard().trigger_count, 3);
        assert_eq!(game.scoreboard().score, 90);
        assert_eq!(game.state().creature.len(), 10);
    }

    #[test]
    fn test_celebration_outlives_game_over() {
        let mut game = Game::with_seed(4);
        game.start();
        for _ in 0..3 {
            feed(&mut game);
            game.tick();
        }
        assert!(game.is_animating());
        assert!(!game.fireworks().is_empty());

        // Run into the right wall
        game.state_mut().creature = crate::sim::Creature::new(Position::new(19, 0));
        let events = game.tick();
        assert_eq!(events, vec![GameEvent::Collided(Collision::Wall)]);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(!game.is_ticking());
        assert!(game.is_animating());

        let mut now = 0.0;
        let mut frames = 0;
        while game.is_animating() {
            game.frame(now);
            now += FRAME_MS;
            frames += 1;
            assert!(frames < 1000, "celebration never finished");
        }
        assert!(game.fireworks().is_empty());
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut game = Game::with_seed(5);
        game.start();
        for _ in 0..3 {
            feed(&mut game);
            game.tick();
        }
        let high = game.scoreboard().high_score;
        assert_eq!(high, 30);
        game.stop();
        assert!(game.restart());

        let board = game.scoreboard();
        assert_eq!(board.score, 0);
        assert_eq!(board.food_eaten, 0);
        assert_eq!(board.trigger_count, 0);
        assert_eq!(board.high_score, 30);
        assert_eq!(game.state().creature.len(), 1);
        assert_eq!(game.state().creature.head(), Position::new(10, 10));
        assert_eq!(game.state().food, Some(Position::new(15, 15)));
        assert_eq!(game.state().latch.facing(), Direction::Right);
        assert!(game.fireworks().is_empty());
        assert!(!game.is_animating());
        assert!(game.is_ticking());
    }

    #[test]
    fn test_shutdown_stops_clocks() {
        let mut game = Game::with_seed(6);
        game.start();
        for _ in 0..3 {
            feed(&mut game);
            game.tick();
        }
        game.shutdown();
        assert!(!game.is_ticking());
        assert!(!game.is_animating());
        let ticks = game.state().time_ticks;
        for i in 0..50 {
            game.frame(i as f64 * 100.0);
        }
        assert_eq!(game.state().time_ticks, ticks);
    }
}
