//! Gravity: glyphs fall, bounce on a floor line and settle

use super::StepContext;
use crate::boundary::wrap_axis;
use crate::config::GravityConfig;
use crate::integrator::integrate;
use crate::particle::Particle;
use crate::rng::ParticleRng;
use glam::Vec2;
use glyphflow_core::Surface;

pub struct GravityForce {
    pub config: GravityConfig,
}

impl GravityForce {
    pub fn new(config: GravityConfig) -> Self {
        Self { config }
    }

    pub fn step(&mut self, particles: &mut [Particle], ctx: &StepContext, rng: &mut ParticleRng) {
        let cfg = &self.config;
        for p in particles.iter_mut() {
            p.velocity.y += cfg.gravity * p.mass();
            p.velocity *= cfg.air_resistance;
            integrate(p, cfg.max_velocity);
            self.resolve_bounds(p, ctx.surface, rng);
        }
    }

    /// Floor line the particles rest on. Never above the top edge.
    pub fn floor(&self, surface: Surface) -> f32 {
        (surface.height - self.config.floor_offset).max(0.0)
    }

    fn resolve_bounds(&self, p: &mut Particle, surface: Surface, rng: &mut ParticleRng) {
        let cfg = &self.config;

        let floor = self.floor(surface);
        if p.position.y >= floor {
            p.position.y = floor;
            p.velocity.y = -p.velocity.y * cfg.bounce_damping;
            p.velocity.x *= cfg.ground_friction;
            if p.velocity.y.abs() < cfg.rest_threshold {
                p.velocity.y = 0.0;
            }
        }

        p.position.x = wrap_axis(p.position.x, surface.width);

        // Escaped through the top: re-enter instead of being lost
        if p.position.y < -cfg.escape_margin {
            p.position = Vec2::new(rng.range(0.0, surface.width.max(0.0)), -cfg.respawn_height);
            p.velocity = Vec2::new(rng.range(-cfg.respawn_spread, cfg.respawn_spread), 0.0);
        }
    }
}
