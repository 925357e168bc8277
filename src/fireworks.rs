//! Firework celebration effect
//!
//! Continuous-time visual state, updated once per display frame and fully
//! independent of the creature tick. Coordinates are play-field pixels with
//! y growing downward; rockets launch from the bottom edge.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::FireworkTuning;

/// A single decaying explosion particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Palette index
    pub color: usize,
    /// Updates remaining
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Opacity for rendering (1 at birth, fading to 0)
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    fn update(&mut self, gravity: f32, friction: f32) {
        self.pos += self.vel + Vec2::new(0.0, gravity);
        self.vel *= friction;
        self.life = self.life.saturating_sub(1);
    }
}

/// A rocket that climbs, bursts, then carries its particles until they fade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firework {
    /// Rocket position (x fixed at launch)
    pub pos: Vec2,
    /// Palette index of the rocket
    pub color: usize,
    /// Altitude (y) below which the rocket bursts
    pub explode_y: f32,
    pub exploded: bool,
    pub particles: Vec<Particle>,
}

impl Firework {
    fn update(&mut self, tuning: &FireworkTuning, palette_len: usize, rng: &mut Pcg32) {
        if self.exploded {
            for particle in &mut self.particles {
                particle.update(tuning.gravity, tuning.friction);
            }
            self.particles.retain(Particle::is_alive);
            return;
        }

        self.pos.y -= tuning.ascent_rate;
        if self.pos.y < self.explode_y {
            self.explode(tuning, palette_len, rng);
        }
    }

    /// Burst into a radial ring of particles
    fn explode(&mut self, tuning: &FireworkTuning, palette_len: usize, rng: &mut Pcg32) {
        let count = rng.random_range(tuning.particles_min..tuning.particles_max);
        let step = std::f32::consts::TAU / count as f32;
        let origin = self.pos;

        self.particles = (0..count)
            .map(|i| {
                let angle = step * i as f32;
                let speed = rng.random_range(tuning.speed_min..tuning.speed_max);
                let life = rng.random_range(tuning.life_min..tuning.life_max);
                Particle {
                    pos: origin,
                    vel: Vec2::from_angle(angle) * speed,
                    color: rng.random_range(0..palette_len),
                    life,
                    max_life: life,
                }
            })
            .collect();
        self.exploded = true;
    }

    /// Still worth keeping around
    fn is_live(&self, ceiling_y: f32) -> bool {
        if self.exploded {
            !self.particles.is_empty()
        } else {
            self.pos.y > ceiling_y
        }
    }
}

/// Fireworks launched for trigger number `trigger_index` (0-based)
///
/// `base * 2^trigger_index`, capped.
pub fn firework_count(base: u32, trigger_index: u32, cap: u32) -> u32 {
    let multiplier = 1u32.checked_shl(trigger_index).unwrap_or(u32::MAX);
    base.saturating_mul(multiplier).min(cap)
}

/// Owns every in-flight firework and particle
#[derive(Debug, Clone)]
pub struct FireworkSystem {
    tuning: FireworkTuning,
    field_size: f32,
    palette_len: usize,
    fireworks: Vec<Firework>,
    rng: Pcg32,
}

impl FireworkSystem {
    pub fn new(seed: u64, tuning: FireworkTuning, field_size: f32, palette_len: usize) -> Self {
        Self {
            tuning,
            field_size,
            palette_len: palette_len.max(1),
            fireworks: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Launch a celebration and return the rockets just launched
    ///
    /// Rockets are spread evenly across the field width and join any
    /// celebration already in flight.
    pub fn trigger(&mut self, trigger_index: u32) -> &[Firework] {
        let base = self
            .rng
            .random_range(self.tuning.base_count_min..=self.tuning.base_count_max);
        let count = firework_count(base, trigger_index, self.tuning.max_fireworks);
        let spacing = self.field_size / (count + 1) as f32;
        let first = self.fireworks.len();

        for i in 0..count {
            let explode_y = self
                .rng
                .random_range(self.tuning.explode_min_y..self.tuning.explode_max_y);
            let color = self.rng.random_range(0..self.palette_len);
            self.fireworks.push(Firework {
                pos: Vec2::new(spacing * (i + 1) as f32, self.field_size),
                color,
                explode_y,
                exploded: false,
                particles: Vec::new(),
            });
        }

        log::info!(
            "Fireworks trigger #{}: {} rockets ({} in flight)",
            trigger_index,
            count,
            self.fireworks.len()
        );
        &self.fireworks[first..]
    }

    /// Advance every firework by one frame and prune the finished ones
    pub fn update(&mut self) {
        if self.fireworks.is_empty() {
            return;
        }

        let tuning = &self.tuning;
        for firework in &mut self.fireworks {
            firework.update(tuning, self.palette_len, &mut self.rng);
        }
        let ceiling = tuning.ceiling_y;
        self.fireworks.retain(|f| f.is_live(ceiling));

        if self.fireworks.is_empty() {
            log::debug!("Celebration finished");
        }
    }

    /// Drop everything in flight
    pub fn clear(&mut self) {
        self.fireworks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty()
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn particle_count(&self) -> usize {
        self.fireworks.iter().map(|f| f.particles.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(seed: u64) -> FireworkSystem {
        FireworkSystem::new(seed, FireworkTuning::default(), 400.0, 15)
    }

    /// Run until every rocket has burst
    fn explode_all(sys: &mut FireworkSystem) {
        for _ in 0..200 {
            if sys.fireworks().iter().all(|f| f.exploded) {
                return;
            }
            sys.update();
        }
        panic!("rockets never exploded");
    }

    #[test]
    fn test_firework_count_scaling() {
        assert_eq!(firework_count(3, 0, 20), 3);
        assert_eq!(firework_count(5, 0, 20), 5);
        assert_eq!(firework_count(3, 1, 20), 6);
        assert_eq!(firework_count(5, 1, 20), 10);
        assert_eq!(firework_count(4, 2, 20), 16);
        assert_eq!(firework_count(5, 2, 20), 20);
        assert_eq!(firework_count(3, 3, 20), 20);
        assert_eq!(firework_count(3, 40, 20), 20);
    }

    #[test]
    fn test_trigger_counts_bounded() {
        for seed in 0..50 {
            let mut sys = system(seed);
            let first = sys.trigger(0).len();
            assert!((3..=5).contains(&first));
            let second = sys.trigger(1).len();
            assert!((6..=10).contains(&second));
            let third = sys.trigger(2).len();
            assert!((12..=20).contains(&third));
        }
    }

    #[test]
    fn test_launch_layout() {
        let mut sys = system(11);
        let count = sys.trigger(0).len();
        let fireworks = sys.fireworks();
        assert_eq!(fireworks.len(), count);
        let spacing = 400.0 / (count + 1) as f32;
        for (i, fw) in fireworks.iter().enumerate() {
            assert!((fw.pos.x - spacing * (i + 1) as f32).abs() < 1e-4);
            assert_eq!(fw.pos.y, 400.0);
            assert!(!fw.exploded);
            assert!(fw.explode_y >= 60.0 && fw.explode_y < 120.0);
            assert!(fw.color < 15);
        }
    }

    #[test]
    fn test_ascent_then_radial_burst() {
        let mut sys = system(2);
        sys.trigger(0);
        sys.update();
        assert!(sys.fireworks().iter().all(|f| f.pos.y == 397.0));

        let tuning = FireworkTuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut fw = Firework {
            pos: Vec2::new(200.0, 100.0),
            color: 0,
            explode_y: 90.0,
            exploded: false,
            particles: Vec::new(),
        };
        fw.update(&tuning, 15, &mut rng);
        fw.update(&tuning, 15, &mut rng);
        assert!(!fw.exploded);
        fw.update(&tuning, 15, &mut rng);
        assert!(fw.exploded);

        let n = fw.particles.len();
        assert!((30..50).contains(&n));
        for (i, p) in fw.particles.iter().enumerate() {
            assert_eq!(p.pos, fw.pos);
            let speed = p.vel.length();
            assert!(speed >= 2.0 - 1e-3 && speed < 5.0 + 1e-3);
            let dir = Vec2::from_angle(std::f32::consts::TAU * i as f32 / n as f32);
            assert!((p.vel.normalize() - dir).length() < 1e-3);
            assert_eq!(p.life, p.max_life);
            assert!((60..90).contains(&p.life));
            assert!(p.color < 15);
        }
    }

    #[test]
    fn test_particle_physics() {
        let mut p = Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(2.0, 0.0),
            color: 0,
            life: 2,
            max_life: 2,
        };
        p.update(0.1, 0.98);
        assert!((p.pos.x - 102.0).abs() < 1e-5);
        assert!((p.pos.y - 100.1).abs() < 1e-5);
        assert!((p.vel.x - 1.96).abs() < 1e-5);
        assert_eq!(p.life, 1);
        assert!((p.alpha() - 0.5).abs() < 1e-6);
        p.update(0.1, 0.98);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_life_strictly_decreases_until_pruned() {
        let mut sys = system(5);
        sys.trigger(0);
        explode_all(&mut sys);

        let mut frames = 0;
        while !sys.is_empty() {
            let before: Vec<Vec<u32>> = sys
                .fireworks()
                .iter()
                .map(|f| f.particles.iter().map(|p| p.life).collect())
                .collect();
            sys.update();
            for fw in sys.fireworks() {
                assert!(fw.particles.iter().all(|p| p.life > 0));
            }
            let total_before: usize = before.iter().map(Vec::len).sum();
            assert!(sys.particle_count() <= total_before);
            frames += 1;
            assert!(frames < 200, "particles outlived their max life");
        }
        assert_eq!(sys.particle_count(), 0);
    }

    #[test]
    fn test_rocket_pruned_at_ceiling() {
        let tuning = FireworkTuning {
            // Burst band above the ceiling: rockets leave before bursting
            explode_min_y: 10.0,
            explode_max_y: 20.0,
            ..FireworkTuning::default()
        };
        let mut sys = FireworkSystem::new(1, tuning, 400.0, 15);
        sys.trigger(0);
        for _ in 0..200 {
            sys.update();
        }
        assert!(sys.is_empty());
    }

    #[test]
    fn test_trigger_appends() {
        let mut sys = system(8);
        let a = sys.trigger(0).len();
        let b = sys.trigger(0).len();
        assert_eq!(sys.fireworks().len(), a + b);
        assert!(sys.fireworks()[a..].iter().all(|f| !f.exploded));
        sys.clear();
        assert!(sys.is_empty());
    }
}
