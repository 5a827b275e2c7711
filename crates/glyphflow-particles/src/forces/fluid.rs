//! Fluid: glyphs with similar codes attract, dissimilar glyphs repel

use super::{sample_neighbor, StepContext};
use crate::config::FluidConfig;
use crate::integrator::integrate;
use crate::particle::Particle;
use crate::rng::ParticleRng;
use glam::Vec2;

pub struct FluidForce {
    pub config: FluidConfig,
}

impl FluidForce {
    pub fn new(config: FluidConfig) -> Self {
        Self { config }
    }

    pub fn step(&mut self, particles: &mut [Particle], ctx: &StepContext, rng: &mut ParticleRng) {
        let len = particles.len();
        for i in 0..len {
            let dv = self.velocity_change(i, particles, rng);
            let p = &mut particles[i];
            p.velocity = (p.velocity + dv) * self.config.friction;
            integrate(p, self.config.max_velocity);
            self.config
                .boundary
                .apply(&mut p.position, &mut p.velocity, ctx.surface);
        }
    }

    /// Summed pairwise force from sampled neighbors, already divided by mass
    fn velocity_change(&self, i: usize, particles: &[Particle], rng: &mut ParticleRng) -> Vec2 {
        let cfg = &self.config;
        let p = &particles[i];
        let mut dv = Vec2::ZERO;

        for _ in 0..cfg.neighbor_samples {
            let Some(j) = sample_neighbor(i, particles.len(), rng) else {
                continue;
            };
            let other = &particles[j];
            let offset = other.position - p.position;
            let dist = offset.length();
            if dist <= 0.0 || dist >= cfg.interaction_radius {
                continue;
            }

            let diff = p.code().abs_diff(other.code());
            let force = if diff < cfg.similarity_threshold {
                cfg.attraction
            } else {
                -cfg.repulsion * diff as f32
            };
            let scaled = force / (dist + 1.0) / p.mass();
            dv += offset / dist * scaled;
        }
        dv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use glyphflow_core::Surface;
    use std::time::Duration;

    fn ctx() -> StepContext {
        StepContext {
            surface: Surface::new(400.0, 400.0),
            elapsed: Duration::ZERO,
        }
    }

    fn isolated(config: FluidConfig) -> FluidForce {
        FluidForce::new(FluidConfig {
            friction: 1.0,
            neighbor_samples: 32,
            ..config
        })
    }

    #[test]
    fn similar_codes_attract() {
        let mut force = isolated(FluidConfig::default());
        let mut particles = vec![
            Particle::new('A', Vec2::new(100.0, 200.0), Vec2::ZERO),
            Particle::new('B', Vec2::new(130.0, 200.0), Vec2::ZERO),
        ];
        let mut rng = ParticleRng::new(5);
        force.step(&mut particles, &ctx(), &mut rng);

        assert!(particles[0].velocity.x > 0.0, "A should move toward B");
        assert!(particles[1].velocity.x < 0.0, "B should move toward A");
        assert!(particles[1].position.x - particles[0].position.x < 30.0);
    }

    #[test]
    fn dissimilar_codes_repel() {
        let mut force = isolated(FluidConfig::default());
        let mut particles = vec![
            Particle::new('!', Vec2::new(100.0, 200.0), Vec2::ZERO),
            Particle::new('z', Vec2::new(120.0, 200.0), Vec2::ZERO),
        ];
        let mut rng = ParticleRng::new(5);
        force.step(&mut particles, &ctx(), &mut rng);

        assert!(particles[0].velocity.x < 0.0);
        assert!(particles[1].velocity.x > 0.0);
    }

    #[test]
    fn out_of_radius_and_coincident_are_ignored() {
        let mut force = isolated(FluidConfig::default());
        let mut particles = vec![
            Particle::new('A', Vec2::new(10.0, 10.0), Vec2::ZERO),
            Particle::new('B', Vec2::new(10.0, 10.0), Vec2::ZERO),
            Particle::new('C', Vec2::new(300.0, 300.0), Vec2::ZERO),
        ];
        let mut rng = ParticleRng::new(8);
        force.step(&mut particles, &ctx(), &mut rng);

        for p in &particles {
            assert_eq!(p.velocity, Vec2::ZERO);
            assert!(p.velocity.is_finite() && p.position.is_finite());
        }
    }

    #[test]
    fn heavier_glyph_accelerates_less() {
        let mut force = isolated(FluidConfig::default());
        // Both pairs differ by 2; '!' sits at the heavy end of the range, '|' at the light end
        let mut heavy = vec![
            Particle::new('!', Vec2::new(100.0, 100.0), Vec2::ZERO),
            Particle::new('#', Vec2::new(110.0, 100.0), Vec2::ZERO),
        ];
        let mut light = vec![
            Particle::new('|', Vec2::new(100.0, 100.0), Vec2::ZERO),
            Particle::new('~', Vec2::new(110.0, 100.0), Vec2::ZERO),
        ];
        force.step(&mut heavy, &ctx(), &mut ParticleRng::new(2));
        force.step(&mut light, &ctx(), &mut ParticleRng::new(2));
        assert!(heavy[0].velocity.x < light[0].velocity.x);
    }

    #[test]
    fn bounce_boundary_is_selectable() {
        let mut force = FluidForce::new(FluidConfig {
            boundary: Boundary::Bounce,
            ..FluidConfig::default()
        });
        let mut particles = vec![Particle::new('x', Vec2::new(399.0, 50.0), Vec2::new(2.5, 0.0))];
        force.step(&mut particles, &ctx(), &mut ParticleRng::new(1));
        assert_eq!(particles[0].position.x, 400.0);
        assert!(particles[0].velocity.x < 0.0);
    }

    #[test]
    fn velocity_stays_clamped() {
        let mut force = FluidForce::new(FluidConfig::default());
        let mut particles: Vec<Particle> = "the quick brown fox jumps"
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(i, c)| {
                Particle::new(c, Vec2::new(190.0 + i as f32, 200.0), Vec2::new(50.0, 0.0))
            })
            .collect();
        let mut rng = ParticleRng::new(77);
        let max = force.config.max_velocity;
        for _ in 0..200 {
            force.step(&mut particles, &ctx(), &mut rng);
            for p in &particles {
                assert!(p.speed_squared() <= max * max * (1.0 + 1e-5));
                assert!((0.0..400.0).contains(&p.position.x));
                assert!((0.0..400.0).contains(&p.position.y));
            }
        }
    }
}
