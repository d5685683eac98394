use crate::constants::{ALPHA_CHARGE, ALPHA_MASS};
use crate::physics::force::CoulombLaw;
use crate::physics::kinematics::euler_step;
use crate::physics::nucleus::{Nucleus, NucleusModel};
use glam::Vec2;
use std::collections::VecDeque;

/// Shared behaviour for anything the force model can act on.
pub trait Particle {
    fn mass(&self) -> f32;
    fn charge(&self) -> f32;
    fn position(&self) -> Vec2;
}

/// Axis-aligned region a particle must stay inside to remain active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Canvas rectangle grown by `margin` on every side.
    pub fn padded(width: f32, height: f32, margin: f32) -> Self {
        Self {
            min: Vec2::splat(-margin),
            max: Vec2::new(width + margin, height + margin),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Position history with a hard capacity; the oldest point is evicted first.
#[derive(Clone, Debug)]
pub struct Trajectory {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trajectory {
    pub fn new(start: Vec2, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut points = VecDeque::with_capacity(capacity + 1);
        points.push_back(start);
        Self { points, capacity }
    }

    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }
}

/// An alpha particle (He²⁺) crossing the foil.
#[derive(Clone, Debug)]
pub struct AlphaParticle {
    position: Vec2,
    velocity: Vec2,
    launch_velocity: Vec2,
    charge: f32,
    mass: f32,
    trajectory: Trajectory,
    active: bool,
}

impl AlphaParticle {
    pub fn new(position: Vec2, velocity: Vec2, trajectory_capacity: usize) -> Self {
        Self {
            position,
            velocity,
            launch_velocity: velocity,
            charge: ALPHA_CHARGE,
            mass: ALPHA_MASS,
            trajectory: Trajectory::new(position, trajectory_capacity),
            active: true,
        }
    }

    /// Advances the particle by one tick.
    ///
    /// The Coulomb push is only applied for the concentrated model; under the
    /// diffuse model particles coast in straight lines.
    pub fn update(&mut self, nucleus: &Nucleus, law: &CoulombLaw, bounds: &Bounds) {
        if !self.active {
            return;
        }

        let acceleration = match nucleus.model {
            NucleusModel::Concentrated => law.acceleration(&*self, nucleus),
            NucleusModel::Diffuse => Vec2::ZERO,
        };

        let (position, velocity) = euler_step(self.position, self.velocity, acceleration);
        self.position = position;
        self.velocity = velocity;
        self.trajectory.push(position);

        if !bounds.contains(position) {
            self.active = false;
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn launch_velocity(&self) -> Vec2 {
        self.launch_velocity
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Particle for AlphaParticle {
    fn mass(&self) -> f32 {
        self.mass
    }

    fn charge(&self) -> f32 {
        self.charge
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn law() -> CoulombLaw {
        CoulombLaw::new(15.0, 0.5)
    }

    fn bounds() -> Bounds {
        Bounds::padded(700.0, 500.0, 50.0)
    }

    fn nucleus(charge: f32, model: NucleusModel) -> Nucleus {
        Nucleus::new(Vec2::new(350.0, 250.0), charge, model)
    }

    #[test]
    fn trajectory_evicts_oldest_points() {
        let mut trajectory = Trajectory::new(Vec2::ZERO, 3);
        for i in 1..=5 {
            trajectory.push(Vec2::new(i as f32, 0.0));
        }
        let xs: Vec<f32> = trajectory.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn trajectory_never_exceeds_capacity() {
        // Slow straight-line particle so it stays in bounds for many ticks.
        let mut particle = AlphaParticle::new(Vec2::new(0.0, 10.0), Vec2::new(0.5, 0.0), 200);
        let nucleus = nucleus(80.0, NucleusModel::Diffuse);
        for _ in 0..500 {
            particle.update(&nucleus, &law(), &bounds());
            assert!(particle.trajectory().len() <= 200);
            assert_eq!(particle.trajectory().last(), Some(particle.position()));
        }
        assert!(particle.is_active());
        assert_eq!(particle.trajectory().len(), 200);
    }

    #[test]
    fn diffuse_model_keeps_velocity_constant() {
        let mut particle = AlphaParticle::new(Vec2::new(-20.0, 240.0), Vec2::new(5.0, 0.0), 200);
        let nucleus = nucleus(100.0, NucleusModel::Diffuse);
        let initial = particle.velocity();
        while particle.is_active() {
            particle.update(&nucleus, &law(), &bounds());
            assert_eq!(particle.velocity(), initial);
        }
    }

    #[test]
    fn concentrated_model_deflects_close_approach() {
        let mut particle = AlphaParticle::new(Vec2::new(-20.0, 245.0), Vec2::new(3.0, 0.0), 200);
        let nucleus = nucleus(80.0, NucleusModel::Concentrated);
        while particle.is_active() {
            particle.update(&nucleus, &law(), &bounds());
        }
        assert!(particle.velocity().y.abs() > 0.1 || particle.velocity().x < 0.0);
    }

    #[test]
    fn uncharged_nucleus_leaves_beam_straight_and_deactivates_past_right_edge() {
        let mut particle = AlphaParticle::new(Vec2::new(-20.0, 250.0), Vec2::new(4.0, 0.0), 200);
        let nucleus = nucleus(0.0, NucleusModel::Concentrated);
        let mut ticks = 0;
        while particle.is_active() {
            particle.update(&nucleus, &law(), &bounds());
            assert_eq!(particle.velocity(), Vec2::new(4.0, 0.0));
            assert_eq!(particle.position().y, 250.0);
            ticks += 1;
            assert!(ticks < 1_000);
        }
        assert!(particle.position().x > 700.0 + 50.0);
    }

    #[test]
    fn inactive_particle_is_frozen() {
        let mut particle = AlphaParticle::new(Vec2::new(760.0, 250.0), Vec2::new(4.0, 0.0), 200);
        let nucleus = nucleus(80.0, NucleusModel::Concentrated);
        particle.update(&nucleus, &law(), &bounds());
        assert!(!particle.is_active());

        let position = particle.position();
        let len = particle.trajectory().len();
        particle.update(&nucleus, &law(), &bounds());
        assert_eq!(particle.position(), position);
        assert_eq!(particle.trajectory().len(), len);
    }

    #[test]
    fn bounds_include_margin() {
        let b = bounds();
        assert!(b.contains(Vec2::new(-50.0, -50.0)));
        assert!(b.contains(Vec2::new(750.0, 550.0)));
        assert!(!b.contains(Vec2::new(750.1, 250.0)));
        assert!(!b.contains(Vec2::new(100.0, -50.5)));
    }
}
