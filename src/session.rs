//! Session context: run counters plus the session high score
//!
//! Held by the game state and reset explicitly on (re)start. The high score
//! lives for the session only; nothing is persisted.

use serde::{Deserialize, Serialize};

/// Progress counters for the current run plus the session best
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    /// Cumulative food eaten this run
    pub food_eaten: u32,
    /// Cumulative firework triggers this run
    pub trigger_count: u32,
    /// Best score seen this session
    pub high_score: u64,
}

impl Session {
    /// Zero the run counters, keeping the high score
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.food_eaten = 0;
        self.trigger_count = 0;
    }

    /// Record one food eaten
    ///
    /// Returns the trigger index (0-based) when this food completes a batch
    /// of `foods_per_trigger`, and bumps the trigger count.
    pub fn record_food(&mut self, reward: u64, foods_per_trigger: u32) -> Option<u32> {
        self.score += reward;
        self.food_eaten += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
        }

        if foods_per_trigger > 0 && self.food_eaten % foods_per_trigger == 0 {
            let index = self.trigger_count;
            self.trigger_count += 1;
            Some(index)
        } else {
            None
        }
    }

    /// Read-only view for a scoreboard
    pub fn scoreboard(&self, foods_per_trigger: u32) -> Scoreboard {
        let per = foods_per_trigger.max(1);
        let into_batch = self.food_eaten % per;
        Scoreboard {
            score: self.score,
            food_eaten: self.food_eaten,
            trigger_count: self.trigger_count,
            high_score: self.high_score,
            rewards_earned: self.food_eaten / per,
            foods_until_next_trigger: per - into_batch,
            reward_progress: into_batch as f32 / per as f32,
        }
    }
}

/// Scoreboard values, updated synchronously with the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    pub food_eaten: u32,
    pub trigger_count: u32,
    pub high_score: u64,
    /// Completed food batches
    pub rewards_earned: u32,
    /// Food still needed for the next celebration
    pub foods_until_next_trigger: u32,
    /// 0..1 progress toward the next celebration
    pub reward_progress: f32,
}
