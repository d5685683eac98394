use crate::constants::ENERGY_MAX;
use crate::physics::kinematics::deflection_angle;
use crate::physics::nucleus::{Nucleus, NucleusModel};
use crate::physics::particle::{AlphaParticle, Particle};
use crate::simulation::config::{SimulationConfig, SimulationParams};
use crate::simulation::spawner::BeamSpawner;
use log::{debug, info, trace};
use std::f32::consts::FRAC_PI_2;

/// Running counts for the current experiment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScatteringStats {
    pub spawned: u64,
    pub exited: u64,
    /// Exits deflected by more than 90° from the launch direction.
    pub backscattered: u64,
}

impl ScatteringStats {
    pub fn backscatter_fraction(&self) -> f64 {
        if self.exited == 0 {
            0.0
        } else {
            self.backscattered as f64 / self.exited as f64
        }
    }
}

/// Read-only view handed to the render adapter once per frame.
pub struct FrameView<'a> {
    pub config: &'a SimulationConfig,
    pub params: &'a SimulationParams,
    pub nucleus: Nucleus,
    pub particles: &'a [AlphaParticle],
    pub stats: ScatteringStats,
}

/// Owns the live particles and the parameter set; advanced once per frame.
pub struct SimulationEngine {
    config: SimulationConfig,
    params: SimulationParams,
    particles: Vec<AlphaParticle>,
    spawner: BeamSpawner,
    stats: ScatteringStats,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_spawner(config, BeamSpawner::new())
    }

    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::with_spawner(config, BeamSpawner::with_seed(seed))
    }

    fn with_spawner(config: SimulationConfig, spawner: BeamSpawner) -> Self {
        Self {
            config,
            params: SimulationParams::default(),
            particles: Vec::new(),
            spawner,
            stats: ScatteringStats::default(),
        }
    }

    /// One frame: maybe spawn, then update every particle and drop the ones
    /// that left the bounds.
    pub fn tick(&mut self, timestamp_ms: f64) {
        let interval = self.spawn_interval_ms();
        if self.params.playing && self.spawner.is_due(timestamp_ms, interval) {
            self.spawn_particle();
            self.spawner.mark_spawned(timestamp_ms);
        }

        self.advance();
    }

    /// Integrates all live particles by one tick and removes inactive ones,
    /// preserving spawn order.
    pub fn advance(&mut self) {
        let nucleus = self.nucleus();
        let law = self.config.coulomb_law();
        let bounds = self.config.bounds();
        let stats = &mut self.stats;

        self.particles.retain_mut(|particle| {
            particle.update(&nucleus, &law, &bounds);
            if particle.is_active() {
                return true;
            }

            let angle = deflection_angle(particle.launch_velocity(), particle.velocity());
            stats.exited += 1;
            if angle > FRAC_PI_2 {
                stats.backscattered += 1;
            }
            trace!(
                "alpha exited at ({:.1}, {:.1}), deflection {:.1}°",
                particle.position().x,
                particle.position().y,
                angle.to_degrees()
            );
            false
        });
    }

    /// Adds one particle at the entry edge using the current energy.
    pub fn spawn_particle(&mut self) -> &AlphaParticle {
        let particle = self.spawner.spawn(&self.config, self.params.energy);
        self.stats.spawned += 1;
        self.particles.push(particle);
        &self.particles[self.particles.len() - 1]
    }

    pub fn reset(&mut self) {
        self.clear();
        self.params.playing = false;
        info!("simulation reset");
    }

    /// Switching models discards every in-flight trajectory.
    pub fn set_model(&mut self, model: NucleusModel) {
        self.params.model = model;
        self.clear();
        info!("nucleus model set to {model}");
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.params.playing != playing {
            info!("simulation {}", if playing { "playing" } else { "paused" });
        }
        self.params.playing = playing;
    }

    pub fn play(&mut self) {
        self.set_playing(true);
    }

    pub fn pause(&mut self) {
        self.set_playing(false);
    }

    /// Energy is held to `0..=100` so the spawn interval stays positive.
    pub fn set_energy(&mut self, energy: u32) {
        self.params.energy = energy.min(ENERGY_MAX);
        debug!("energy set to {}", self.params.energy);
    }

    pub fn set_protons(&mut self, protons: u32) {
        self.params.protons = protons;
        debug!("proton count set to {protons}");
    }

    pub fn set_neutrons(&mut self, neutrons: u32) {
        self.params.neutrons = neutrons;
        debug!("neutron count set to {neutrons}");
    }

    pub fn set_show_traces(&mut self, show: bool) {
        self.params.show_traces = show;
    }

    /// The nucleus as the force model sees it this tick.
    pub fn nucleus(&self) -> Nucleus {
        Nucleus::new(
            self.config.nucleus_position,
            self.params.protons as f32,
            self.params.model,
        )
    }

    pub fn spawn_interval_ms(&self) -> f64 {
        self.config.spawn_interval_ms(self.params.energy)
    }

    pub fn particles(&self) -> &[AlphaParticle] {
        &self.particles
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> ScatteringStats {
        self.stats
    }

    pub fn frame(&self) -> FrameView<'_> {
        FrameView {
            config: &self.config,
            params: &self.params,
            nucleus: self.nucleus(),
            particles: &self.particles,
            stats: self.stats,
        }
    }

    fn clear(&mut self) {
        self.particles.clear();
        self.stats = ScatteringStats::default();
    }
}
