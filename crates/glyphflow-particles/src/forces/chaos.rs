//! Chaos: random kicks, a weak pull to the center and energetic wall bounces

use super::StepContext;
use crate::config::ChaosConfig;
use crate::integrator::integrate;
use crate::particle::Particle;
use crate::rng::ParticleRng;
use glam::Vec2;
use glyphflow_core::Surface;

pub struct ChaosForce {
    pub config: ChaosConfig,
}

impl ChaosForce {
    pub fn new(config: ChaosConfig) -> Self {
        Self { config }
    }

    pub fn step(&mut self, particles: &mut [Particle], ctx: &StepContext, rng: &mut ParticleRng) {
        let cfg = &self.config;
        let center = Vec2::from(ctx.surface.center());

        for p in particles.iter_mut() {
            if rng.chance(cfg.impulse_probability) {
                let magnitude = rng.range(cfg.impulse_min, cfg.impulse_max);
                p.velocity += rng.random_direction() * magnitude;
            }
            p.velocity += (center - p.position) * cfg.center_pull;
            p.velocity *= cfg.friction;
            integrate(p, cfg.max_velocity);
            self.bounce(p, ctx.surface, rng);
        }
    }

    /// Reflect off the edges, amplifying the reflected component and kicking
    /// the orthogonal one
    fn bounce(&self, p: &mut Particle, surface: Surface, rng: &mut ParticleRng) {
        let cfg = &self.config;
        let width = surface.width.max(0.0);
        let height = surface.height.max(0.0);

        if p.position.x < 0.0 || p.position.x > width {
            p.position.x = p.position.x.clamp(0.0, width);
            p.velocity.x = -p.velocity.x * cfg.bounce_energy;
            p.velocity.y += rng.range(-cfg.bounce_jitter, cfg.bounce_jitter);
        }
        if p.position.y < 0.0 || p.position.y > height {
            p.position.y = p.position.y.clamp(0.0, height);
            p.velocity.y = -p.velocity.y * cfg.bounce_energy;
            p.velocity.x += rng.range(-cfg.bounce_jitter, cfg.bounce_jitter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ctx() -> StepContext {
        StepContext {
            surface: Surface::new(300.0, 200.0),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn wall_bounce_amplifies() {
        let mut force = ChaosForce::new(ChaosConfig {
            impulse_probability: 0.0,
            center_pull: 0.0,
            friction: 1.0,
            ..ChaosConfig::default()
        });
        let mut particles = vec![Particle::new('q', Vec2::new(298.0, 100.0), Vec2::new(4.0, 0.0))];
        force.step(&mut particles, &ctx(), &mut ParticleRng::new(3));
        let p = particles[0];
        assert_eq!(p.position.x, 300.0);
        assert!((p.velocity.x + 4.0 * force.config.bounce_energy).abs() < 1e-5);
        assert!(p.velocity.y.abs() <= force.config.bounce_jitter);
    }

    #[test]
    fn center_pull_restores() {
        let mut force = ChaosForce::new(ChaosConfig {
            impulse_probability: 0.0,
            friction: 1.0,
            ..ChaosConfig::default()
        });
        let mut particles = vec![Particle::new('q', Vec2::new(10.0, 10.0), Vec2::ZERO)];
        force.step(&mut particles, &ctx(), &mut ParticleRng::new(3));
        assert!(particles[0].velocity.x > 0.0);
        assert!(particles[0].velocity.y > 0.0);
    }

    #[test]
    fn stays_inside_and_bounded() {
        let mut force = ChaosForce::new(ChaosConfig::default());
        let mut particles: Vec<Particle> = "chaos!"
            .chars()
            .map(|c| Particle::new(c, Vec2::new(150.0, 100.0), Vec2::ZERO))
            .collect();
        let mut rng = ParticleRng::new(99);
        let cfg = force.config.clone();
        // Post-bounce speed may exceed the clamp by the bounce gain and jitter
        let limit = cfg.max_velocity * cfg.bounce_energy + 2.0 * cfg.bounce_jitter;
        for _ in 0..2000 {
            force.step(&mut particles, &ctx(), &mut rng);
            for p in &particles {
                assert!((0.0..=300.0).contains(&p.position.x));
                assert!((0.0..=200.0).contains(&p.position.y));
                assert!(p.velocity.length() <= limit);
            }
        }
    }

    #[test]
    fn never_settles() {
        let mut force = ChaosForce::new(ChaosConfig::default());
        let mut particles: Vec<Particle> = "abcdefgh"
            .chars()
            .map(|c| Particle::new(c, Vec2::new(150.0, 100.0), Vec2::ZERO))
            .collect();
        let mut rng = ParticleRng::new(2024);
        for _ in 0..3000 {
            force.step(&mut particles, &ctx(), &mut rng);
        }
        // Every window late in the run still carries energy
        for _ in 0..20 {
            let mut energy = 0.0;
            for _ in 0..50 {
                force.step(&mut particles, &ctx(), &mut rng);
                energy += particles.iter().map(|p| p.speed_squared()).sum::<f32>();
            }
            assert!(energy > 0.0);
        }
    }
}
