//! Explicit configuration and parameter state for the scattering engine.
//!
//! [`SimulationConfig`] holds the fixed geometry and physics tunables.
//! [`SimulationParams`] holds the values the control surface changes at runtime.

use crate::constants::*;
use crate::physics::force::CoulombLaw;
use crate::physics::nucleus::NucleusModel;
use crate::physics::particle::Bounds;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const ENERGY_RANGE: RangeInclusive<u32> = ENERGY_MIN..=ENERGY_MAX;
pub const PROTON_RANGE: RangeInclusive<u32> = PROTONS_MIN..=PROTONS_MAX;
pub const NEUTRON_RANGE: RangeInclusive<u32> = NEUTRONS_MIN..=NEUTRONS_MAX;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub nucleus_position: Vec2,
    pub nucleus_radius: f32,
    pub diffuse_radius: f32,
    pub coulomb_constant: f32,
    pub min_force_distance: f32,
    pub trajectory_capacity: usize,
    pub bounds_margin: f32,
    pub entry_x: f32,
    pub beam_width: f32,
    pub base_spawn_interval_ms: f64,
    pub spawn_rate_scale_ms: f64,
    pub base_speed: f32,
    pub speed_scale: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            nucleus_position: Vec2::new(NUCLEUS_X, NUCLEUS_Y),
            nucleus_radius: NUCLEUS_RADIUS,
            diffuse_radius: DIFFUSE_RADIUS,
            coulomb_constant: COULOMB_CONSTANT,
            min_force_distance: MIN_FORCE_DISTANCE,
            trajectory_capacity: TRAJECTORY_CAPACITY,
            bounds_margin: BOUNDS_MARGIN,
            entry_x: ENTRY_X,
            beam_width: BEAM_WIDTH,
            base_spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            spawn_rate_scale_ms: SPAWN_RATE_SCALE_MS,
            base_speed: BASE_SPEED,
            speed_scale: SPEED_SCALE,
        }
    }
}

impl SimulationConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::padded(self.canvas_width, self.canvas_height, self.bounds_margin)
    }

    pub fn coulomb_law(&self) -> CoulombLaw {
        CoulombLaw::new(self.coulomb_constant, self.min_force_distance)
    }

    /// Milliseconds between spawns: `base - energy * scale`, never below 1 ms.
    pub fn spawn_interval_ms(&self, energy: u32) -> f64 {
        let energy = f64::from(energy.min(ENERGY_MAX));
        (self.base_spawn_interval_ms - energy * self.spawn_rate_scale_ms).max(1.0)
    }

    /// Launch speed in units per tick, linear in energy.
    pub fn launch_speed(&self, energy: u32) -> f32 {
        let fraction = energy.min(ENERGY_MAX) as f32 / ENERGY_MAX as f32;
        self.base_speed + fraction * self.speed_scale
    }
}

/// Runtime parameters mutated by the control surface between frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub protons: u32,
    pub neutrons: u32,
    pub energy: u32,
    pub model: NucleusModel,
    pub playing: bool,
    pub show_traces: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            protons: DEFAULT_PROTONS,
            neutrons: DEFAULT_NEUTRONS,
            energy: DEFAULT_ENERGY,
            model: NucleusModel::Concentrated,
            playing: false,
            show_traces: true,
        }
    }
}
