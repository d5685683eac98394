use crate::physics::particle::AlphaParticle;
use crate::simulation::config::SimulationConfig;
use glam::Vec2;
use log::trace;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};

/// Emits alpha particles at the left edge of the canvas with a random
/// impact parameter inside the beam width.
pub struct BeamSpawner {
    rng: ChaCha8Rng,
    last_spawn_ms: f64,
}

impl BeamSpawner {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            last_spawn_ms: 0.0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_spawn_ms: 0.0,
        }
    }

    /// True once more than one spawn interval has passed since the last spawn.
    pub fn is_due(&self, timestamp_ms: f64, interval_ms: f64) -> bool {
        timestamp_ms - self.last_spawn_ms > interval_ms
    }

    pub fn mark_spawned(&mut self, timestamp_ms: f64) {
        self.last_spawn_ms = timestamp_ms;
    }

    /// Uniform offset in `[-beam_width / 2, beam_width / 2)` from the nucleus row.
    pub fn sample_offset(&mut self, beam_width: f32) -> f32 {
        let half = beam_width.abs() * 0.5;
        if half <= 0.0 {
            return 0.0;
        }
        Uniform::new(-half, half).sample(&mut self.rng)
    }

    pub fn spawn(&mut self, config: &SimulationConfig, energy: u32) -> AlphaParticle {
        let offset = self.sample_offset(config.beam_width);
        let position = Vec2::new(config.entry_x, config.nucleus_position.y + offset);
        let velocity = Vec2::new(config.launch_speed(energy), 0.0);
        trace!("spawned alpha at ({:.1}, {:.1}) with vx {:.2}", position.x, position.y, velocity.x);
        AlphaParticle::new(position, velocity, config.trajectory_capacity)
    }
}

impl Default for BeamSpawner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::particle::Particle;

    #[test]
    fn spawns_inside_beam_at_entry_edge() {
        let config = SimulationConfig::default();
        let mut spawner = BeamSpawner::with_seed(7);
        for _ in 0..1_000 {
            let particle = spawner.spawn(&config, 75);
            let p = particle.position();
            assert_eq!(p.x, -20.0);
            assert!(p.y >= 250.0 - 150.0 && p.y <= 250.0 + 150.0);
            assert_eq!(particle.velocity(), Vec2::new(5.0, 0.0));
            assert_eq!(particle.trajectory().len(), 1);
        }
    }

    #[test]
    fn same_seed_gives_same_beam() {
        let config = SimulationConfig::default();
        let mut a = BeamSpawner::with_seed(3);
        let mut b = BeamSpawner::with_seed(3);
        for _ in 0..10 {
            assert_eq!(a.spawn(&config, 10).position(), b.spawn(&config, 10).position());
        }
    }

    #[test]
    fn due_only_after_interval_elapses() {
        let mut spawner = BeamSpawner::with_seed(1);
        assert!(!spawner.is_due(250.0, 250.0));
        assert!(spawner.is_due(250.5, 250.0));
        spawner.mark_spawned(250.5);
        assert!(!spawner.is_due(400.0, 250.0));
        assert!(spawner.is_due(600.0, 250.0));
    }

    #[test]
    fn zero_beam_width_has_no_offset() {
        let mut spawner = BeamSpawner::with_seed(1);
        assert_eq!(spawner.sample_offset(0.0), 0.0);
    }
}
