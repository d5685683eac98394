use crate::physics::kinematics::{direction, displacement, magnitude};
use crate::physics::nucleus::Nucleus;
use crate::physics::particle::Particle;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Inverse-square central force `k * q1 * q2 / r²` between a particle and the nucleus.
///
/// `k` is a visual tuning constant, not the SI Coulomb constant. There is no
/// range cutoff, so distant particles still pick up small deflections.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoulombLaw {
    pub k: f32,
    /// Distances below this are clamped before dividing.
    pub min_distance: f32,
}

impl CoulombLaw {
    pub const fn new(k: f32, min_distance: f32) -> Self {
        Self { k, min_distance }
    }

    /// Signed force magnitude at distance `r`; positive repels.
    pub fn force_magnitude(&self, q_particle: f32, q_nucleus: f32, r: f32) -> f32 {
        let r = r.max(self.min_distance);
        self.k * q_particle * q_nucleus / (r * r)
    }

    /// Acceleration for one tick, directed along the nucleus → particle line.
    ///
    /// A particle sitting exactly on the nucleus centre has no direction and
    /// receives zero acceleration for that tick.
    pub fn acceleration<P: Particle>(&self, particle: &P, nucleus: &Nucleus) -> Vec2 {
        let offset = displacement(nucleus.position, particle.position());
        let unit = direction(offset);
        if unit == Vec2::ZERO {
            return Vec2::ZERO;
        }

        let force = self.force_magnitude(particle.charge(), nucleus.charge, magnitude(offset));
        unit * (force / particle.mass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::nucleus::NucleusModel;
    use crate::physics::particle::AlphaParticle;

    fn law() -> CoulombLaw {
        CoulombLaw::new(15.0, 0.5)
    }

    fn gold_nucleus() -> Nucleus {
        Nucleus::new(Vec2::new(350.0, 250.0), 79.0, NucleusModel::Concentrated)
    }

    fn alpha_at(x: f32, y: f32) -> AlphaParticle {
        AlphaParticle::new(Vec2::new(x, y), Vec2::ZERO, 200)
    }

    #[test]
    fn acceleration_points_away_from_nucleus() {
        let nucleus = gold_nucleus();
        let a = law().acceleration(&alpha_at(300.0, 250.0), &nucleus);
        assert!(a.x < 0.0);
        assert!(a.y.abs() < 1e-6);

        let b = law().acceleration(&alpha_at(350.0, 280.0), &nucleus);
        assert!(b.y > 0.0);
    }

    #[test]
    fn acceleration_strictly_increases_as_distance_shrinks() {
        let nucleus = gold_nucleus();
        let mut previous = 0.0;
        for distance in [400.0, 200.0, 100.0, 50.0, 10.0, 2.0, 1.0] {
            let a = law().acceleration(&alpha_at(350.0 - distance, 250.0), &nucleus);
            let current = a.length();
            assert!(current > previous, "{current} <= {previous} at r = {distance}");
            previous = current;
        }
    }

    #[test]
    fn follows_inverse_square_scaling() {
        let nucleus = gold_nucleus();
        let near = law().acceleration(&alpha_at(250.0, 250.0), &nucleus).length();
        let far = law().acceleration(&alpha_at(150.0, 250.0), &nucleus).length();
        assert!((near / far - 4.0).abs() < 1e-3);
    }

    #[test]
    fn zero_nucleus_charge_gives_zero_acceleration() {
        let nucleus = Nucleus::new(Vec2::new(350.0, 250.0), 0.0, NucleusModel::Concentrated);
        let a = law().acceleration(&alpha_at(-20.0, 250.0), &nucleus);
        assert_eq!(a, Vec2::ZERO);
    }

    #[test]
    fn coincident_particle_stays_finite() {
        let nucleus = gold_nucleus();
        let a = law().acceleration(&alpha_at(350.0, 250.0), &nucleus);
        assert_eq!(a, Vec2::ZERO);

        let b = law().acceleration(&alpha_at(350.0 + 1e-3, 250.0), &nucleus);
        assert!(b.is_finite());
        assert!(b.x > 0.0);
    }

    #[test]
    fn opposite_charges_attract() {
        let nucleus = Nucleus::new(Vec2::new(350.0, 250.0), -10.0, NucleusModel::Concentrated);
        let a = law().acceleration(&alpha_at(300.0, 250.0), &nucleus);
        assert!(a.x > 0.0);
    }
}
