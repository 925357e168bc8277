//! Update sources
//!
//! Two decoupled clocks driven by the host's frame callback:
//! - `FixedClock`: accumulator-based fixed period for the creature tick
//! - `FrameClock`: one update per display frame for the fireworks
//!
//! Both are plain values owned by the game; disarming them is synchronous, so
//! once stopped nothing they drive can run again until re-armed.

/// Fixed-period clock (accumulator with a catch-up cap)
#[derive(Debug, Clone)]
pub struct FixedClock {
    period_ms: f64,
    max_steps: u32,
    accumulator: f64,
    running: bool,
}

impl FixedClock {
    pub fn new(period_ms: f64, max_steps: u32) -> Self {
        Self {
            period_ms,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Start from a clean phase: the first tick is one full period away
    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = 0.0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed elapsed time; returns how many ticks are due now
    ///
    /// Backlog beyond `max_steps` is dropped to prevent a spiral of death.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }

        self.accumulator += dt_ms.max(0.0);
        let mut due = 0;
        while self.accumulator >= self.period_ms && due < self.max_steps {
            self.accumulator -= self.period_ms;
            due += 1;
        }
        if self.accumulator >= self.period_ms {
            log::debug!(
                "Dropping {:.0} ms of tick backlog",
                self.accumulator - self.accumulator % self.period_ms
            );
            self.accumulator %= self.period_ms;
        }
        due
    }
}

/// Per-frame clock
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    armed: bool,
    frames: u64,
}

impl FrameClock {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Frames delivered since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Called once per display frame; true if an update should run
    pub fn frame(&mut self) -> bool {
        if self.armed {
            self.frames += 1;
        }
        self.armed
    }
}
