//! Boundary policies applied after each position update

use glam::Vec2;
use glyphflow_core::Surface;
use serde::{Deserialize, Serialize};

/// How a particle leaving the surface is brought back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Re-enter from the opposite edge
    #[default]
    Wrap,
    /// Invert the velocity on the crossed axis and clamp back inside
    Bounce,
}

impl Boundary {
    pub fn apply(self, position: &mut Vec2, velocity: &mut Vec2, surface: Surface) {
        match self {
            Boundary::Wrap => {
                position.x = wrap_axis(position.x, surface.width);
                position.y = wrap_axis(position.y, surface.height);
            }
            Boundary::Bounce => {
                bounce_axis(&mut position.x, &mut velocity.x, surface.width);
                bounce_axis(&mut position.y, &mut velocity.y, surface.height);
            }
        }
    }
}

/// Wrap one coordinate into `[0, extent)`.
///
/// A coordinate within one extent of the range is shifted by exactly one
/// extent; anything further out (only possible after the surface shrank)
/// is folded with a Euclidean remainder. A non-positive extent collapses
/// the coordinate to zero.
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if extent.is_nan() || extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = if value < 0.0 {
        value + extent
    } else if value >= extent {
        value - extent
    } else {
        return value;
    };
    if (0.0..extent).contains(&wrapped) {
        wrapped
    } else {
        let folded = wrapped.rem_euclid(extent);
        // rem_euclid can round up to `extent` for tiny negative inputs
        if folded >= extent {
            0.0
        } else {
            folded
        }
    }
}

/// Reflect one axis: when outside `[0, extent]`, clamp the coordinate and
/// invert the velocity component. Returns true when a bounce happened.
pub fn bounce_axis(value: &mut f32, velocity: &mut f32, extent: f32) -> bool {
    let max = extent.max(0.0);
    if *value < 0.0 {
        *value = 0.0;
        *velocity = -*velocity;
        true
    } else if *value > max {
        *value = max;
        *velocity = -*velocity;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_shifts_by_one_extent() {
        assert_eq!(wrap_axis(105.0, 100.0), 5.0);
        assert_eq!(wrap_axis(-5.0, 100.0), 95.0);
        assert_eq!(wrap_axis(50.0, 100.0), 50.0);
        assert_eq!(wrap_axis(100.0, 100.0), 0.0);
    }

    #[test]
    fn wrap_folds_far_values() {
        assert_eq!(wrap_axis(350.0, 100.0), 50.0);
        assert_eq!(wrap_axis(-250.0, 100.0), 50.0);
        let tiny = wrap_axis(-1e-9, 100.0);
        assert!((0.0..100.0).contains(&tiny));
    }

    #[test]
    fn wrap_degenerate_extent() {
        assert_eq!(wrap_axis(42.0, 0.0), 0.0);
        assert_eq!(wrap_axis(42.0, -10.0), 0.0);
        assert_eq!(wrap_axis(f32::NAN, 100.0), 0.0);
    }

    #[test]
    fn bounce_inverts_and_clamps() {
        let mut x = 103.0;
        let mut vx = 4.0;
        assert!(bounce_axis(&mut x, &mut vx, 100.0));
        assert_eq!(x, 100.0);
        assert_eq!(vx, -4.0);

        let mut y = -2.0;
        let mut vy = -3.0;
        assert!(bounce_axis(&mut y, &mut vy, 100.0));
        assert_eq!(y, 0.0);
        assert_eq!(vy, 3.0);

        let mut inside = 50.0;
        let mut v = 1.0;
        assert!(!bounce_axis(&mut inside, &mut v, 100.0));
        assert_eq!(v, 1.0);
    }

    #[test]
    fn policy_applies_per_axis() {
        let surface = Surface::new(100.0, 50.0);
        let mut pos = Vec2::new(101.0, -1.0);
        let mut vel = Vec2::new(2.0, -2.0);
        Boundary::Wrap.apply(&mut pos, &mut vel, surface);
        assert_eq!(pos, Vec2::new(1.0, 49.0));
        assert_eq!(vel, Vec2::new(2.0, -2.0));

        let mut pos = Vec2::new(101.0, 20.0);
        let mut vel = Vec2::new(2.0, -2.0);
        Boundary::Bounce.apply(&mut pos, &mut vel, surface);
        assert_eq!(pos, Vec2::new(100.0, 20.0));
        assert_eq!(vel, Vec2::new(-2.0, -2.0));
    }
}
