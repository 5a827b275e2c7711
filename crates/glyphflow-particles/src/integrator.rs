//! Velocity clamp and explicit-Euler position update shared by all modes

use crate::particle::Particle;
use glam::Vec2;

/// Logical timestep. Wall-clock time decides when a tick runs, never how
/// far it moves.
pub const DT: f32 = 1.0;

/// Rescale `velocity` to `max_velocity` when its magnitude exceeds it.
/// Non-finite velocities are zeroed.
pub fn clamp_velocity(velocity: Vec2, max_velocity: f32) -> Vec2 {
    if !velocity.is_finite() {
        return Vec2::ZERO;
    }
    let speed_sq = velocity.length_squared();
    if speed_sq > max_velocity * max_velocity {
        velocity * (max_velocity / speed_sq.sqrt())
    } else {
        velocity
    }
}

/// Clamp the particle's velocity, then advance its position by one step
pub fn integrate(p: &mut Particle, max_velocity: f32) {
    p.velocity = clamp_velocity(p.velocity, max_velocity);
    p.position += p.velocity * DT;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_direction() {
        let v = clamp_velocity(Vec2::new(30.0, 40.0), 5.0);
        assert!((v.length() - 5.0).abs() < 1e-5);
        assert!((v.x - 3.0).abs() < 1e-5);
        assert!((v.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn clamp_leaves_slow_velocity() {
        let v = Vec2::new(1.0, -1.0);
        assert_eq!(clamp_velocity(v, 5.0), v);
    }

    #[test]
    fn clamp_zeroes_non_finite() {
        assert_eq!(clamp_velocity(Vec2::new(f32::NAN, 1.0), 5.0), Vec2::ZERO);
        assert_eq!(clamp_velocity(Vec2::new(f32::INFINITY, 0.0), 5.0), Vec2::ZERO);
    }

    #[test]
    fn integrate_moves_by_clamped_velocity() {
        let mut p = Particle::new('a', Vec2::new(10.0, 10.0), Vec2::new(0.0, 20.0));
        integrate(&mut p, 4.0);
        assert_eq!(p.velocity, Vec2::new(0.0, 4.0));
        assert_eq!(p.position, Vec2::new(10.0, 14.0));
    }
}
