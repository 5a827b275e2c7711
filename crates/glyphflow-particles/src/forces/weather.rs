//! Weather: drifting vortices swirl nearby glyphs while a slow wind turns

use super::StepContext;
use crate::boundary::Boundary;
use crate::config::WeatherConfig;
use crate::integrator::integrate;
use crate::particle::Particle;
use crate::rng::ParticleRng;
use glam::Vec2;
use glyphflow_core::Surface;
use std::f32::consts::TAU;

/// A drifting rotational disturbance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vortex {
    pub position: Vec2,
    pub velocity: Vec2,
    pub strength: f32,
    /// +1 or -1, fixed for the run
    pub rotation: f32,
}

impl Vortex {
    /// Tangential push on a point at `offset` from the vortex center.
    /// Zero at the center and at or beyond `radius`.
    pub fn force_at(&self, offset: Vec2, radius: f32) -> Vec2 {
        let dist = offset.length();
        if dist <= 0.0 || dist >= radius {
            return Vec2::ZERO;
        }
        let falloff = 1.0 - dist / radius;
        offset.perp() / dist * (self.rotation * self.strength * falloff)
    }
}

/// The fixed set of vortices owned by a weather run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VortexField {
    vortices: Vec<Vortex>,
}

impl VortexField {
    /// Spawn `config.vortex_count` vortices at random positions with
    /// strength within 20% of the base value and a random spin direction
    pub fn spawn(config: &WeatherConfig, surface: Surface, rng: &mut ParticleRng) -> Self {
        let width = surface.width.max(0.0);
        let height = surface.height.max(0.0);
        let vortices = (0..config.vortex_count)
            .map(|_| Vortex {
                position: Vec2::new(rng.range(0.0, width), rng.range(0.0, height)),
                velocity: Vec2::new(
                    rng.range(-config.vortex_speed, config.vortex_speed),
                    rng.range(-config.vortex_speed, config.vortex_speed),
                ),
                strength: config.vortex_strength * rng.range(0.8, 1.2),
                rotation: rng.sign(),
            })
            .collect();
        Self { vortices }
    }

    pub fn from_vortices(vortices: Vec<Vortex>) -> Self {
        Self { vortices }
    }

    pub fn vortices(&self) -> &[Vortex] {
        &self.vortices
    }

    pub fn len(&self) -> usize {
        self.vortices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vortices.is_empty()
    }

    /// Move every vortex by its velocity and reverse any axis on which it
    /// is outside the surface and still heading away. No damping, no
    /// clamping. A vortex left outside by a shrinking resize drifts back.
    pub fn advance(&mut self, surface: Surface) {
        for v in &mut self.vortices {
            v.position += v.velocity;
            if heading_out(v.position.x, v.velocity.x, surface.width) {
                v.velocity.x = -v.velocity.x;
            }
            if heading_out(v.position.y, v.velocity.y, surface.height) {
                v.velocity.y = -v.velocity.y;
            }
        }
    }

    /// Summed tangential force of every vortex on `position`
    pub fn force_at(&self, position: Vec2, radius: f32) -> Vec2 {
        self.vortices
            .iter()
            .map(|v| v.force_at(position - v.position, radius))
            .sum()
    }
}

fn heading_out(value: f32, velocity: f32, extent: f32) -> bool {
    (value < 0.0 && velocity < 0.0) || (value > extent && velocity > 0.0)
}

pub struct WeatherForce {
    pub config: WeatherConfig,
    pub field: VortexField,
}

impl WeatherForce {
    pub fn new(config: WeatherConfig, surface: Surface, rng: &mut ParticleRng) -> Self {
        let field = VortexField::spawn(&config, surface, rng);
        Self { config, field }
    }

    pub fn with_field(config: WeatherConfig, field: VortexField) -> Self {
        Self { config, field }
    }

    /// Global wind at `elapsed` seconds: a fixed-strength vector whose
    /// direction turns once per `wind_period`
    pub fn wind(&self, elapsed_secs: f32) -> Vec2 {
        let angle = elapsed_secs * TAU / self.config.wind_period;
        Vec2::from_angle(angle) * self.config.wind_strength
    }

    pub fn step(&mut self, particles: &mut [Particle], ctx: &StepContext, _rng: &mut ParticleRng) {
        self.field.advance(ctx.surface);

        let cfg = &self.config;
        let wind = self.wind(ctx.elapsed.as_secs_f32());
        for p in particles.iter_mut() {
            p.velocity += self.field.force_at(p.position, cfg.vortex_radius);
            p.velocity += wind;
            p.velocity *= cfg.friction;
            integrate(p, cfg.max_velocity);
            Boundary::Wrap.apply(&mut p.position, &mut p.velocity, ctx.surface);
        }
    }
}
