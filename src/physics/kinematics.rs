//! 2D position/velocity primitives shared by the force model and particles.

use glam::Vec2;

/// Below this length a displacement has no usable direction.
pub const DIRECTION_EPSILON: f32 = 1e-6;

/// Vector pointing from `from` to `to`.
pub fn displacement(from: Vec2, to: Vec2) -> Vec2 {
    to - from
}

pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

/// Unit vector along `v`, or zero when `v` is (nearly) zero.
pub fn direction(v: Vec2) -> Vec2 {
    let length = v.length();
    if length < DIRECTION_EPSILON {
        Vec2::ZERO
    } else {
        v / length
    }
}

/// One explicit Euler step with a unit timestep: returns `(position, velocity)`.
pub fn euler_step(position: Vec2, velocity: Vec2, acceleration: Vec2) -> (Vec2, Vec2) {
    let velocity = velocity + acceleration;
    (position + velocity, velocity)
}

/// Unsigned angle between two vectors in radians, zero if either is degenerate.
pub fn deflection_angle(initial: Vec2, current: Vec2) -> f32 {
    let a = direction(initial);
    let b = direction(current);
    if a == Vec2::ZERO || b == Vec2::ZERO {
        return 0.0;
    }
    a.dot(b).clamp(-1.0, 1.0).acos()
}
