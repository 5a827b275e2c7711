//! The five force models and the closed variant that dispatches between them

mod chaos;
mod fluid;
mod gravity;
mod swarm;
mod weather;

pub use chaos::ChaosForce;
pub use fluid::FluidForce;
pub use gravity::GravityForce;
pub use swarm::SwarmForce;
pub use weather::{Vortex, VortexField, WeatherForce};

use crate::config::SimulationConfig;
use crate::particle::Particle;
use crate::rng::ParticleRng;
use glyphflow_core::{Mode, Surface};
use std::time::Duration;

/// Per-tick inputs shared by every model
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    pub surface: Surface,
    /// Wall-clock time since the run started; only the weather wind reads it
    pub elapsed: Duration,
}

/// The active physics model, chosen once when the engine is built.
///
/// Each variant owns its constants and steps the whole particle slice in
/// place: force, then integrator, then boundary, particle by particle.
pub enum ForceModel {
    Fluid(FluidForce),
    Gravity(GravityForce),
    Chaos(ChaosForce),
    Weather(WeatherForce),
    Swarm(SwarmForce),
}

impl ForceModel {
    /// Build the model for `mode` from its block in `config`. Weather mode
    /// spawns its vortex field here.
    pub fn from_config(
        mode: Mode,
        config: &SimulationConfig,
        surface: Surface,
        rng: &mut ParticleRng,
    ) -> Self {
        match mode {
            Mode::Fluid => ForceModel::Fluid(FluidForce::new(config.fluid.clone())),
            Mode::Gravity => ForceModel::Gravity(GravityForce::new(config.gravity.clone())),
            Mode::Chaos => ForceModel::Chaos(ChaosForce::new(config.chaos.clone())),
            Mode::Weather => {
                ForceModel::Weather(WeatherForce::new(config.weather.clone(), surface, rng))
            }
            Mode::Swarm => ForceModel::Swarm(SwarmForce::new(config.swarm.clone())),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            ForceModel::Fluid(_) => Mode::Fluid,
            ForceModel::Gravity(_) => Mode::Gravity,
            ForceModel::Chaos(_) => Mode::Chaos,
            ForceModel::Weather(_) => Mode::Weather,
            ForceModel::Swarm(_) => Mode::Swarm,
        }
    }

    /// Speed limit enforced by the integrator for this model
    pub fn max_velocity(&self) -> f32 {
        match self {
            ForceModel::Fluid(f) => f.config.max_velocity,
            ForceModel::Gravity(f) => f.config.max_velocity,
            ForceModel::Chaos(f) => f.config.max_velocity,
            ForceModel::Weather(f) => f.config.max_velocity,
            ForceModel::Swarm(f) => f.config.max_velocity,
        }
    }

    /// Advance every particle by one tick
    pub fn step(&mut self, particles: &mut [Particle], ctx: &StepContext, rng: &mut ParticleRng) {
        match self {
            ForceModel::Fluid(f) => f.step(particles, ctx, rng),
            ForceModel::Gravity(f) => f.step(particles, ctx, rng),
            ForceModel::Chaos(f) => f.step(particles, ctx, rng),
            ForceModel::Weather(f) => f.step(particles, ctx, rng),
            ForceModel::Swarm(f) => f.step(particles, ctx, rng),
        }
    }

    pub fn vortex_field(&self) -> Option<&VortexField> {
        match self {
            ForceModel::Weather(f) => Some(&f.field),
            _ => None,
        }
    }
}

/// Draw one neighbor index for particle `index` out of `len`.
///
/// Sampling is with replacement, and drawing `index` itself yields `None`
/// with no redraw. A model asking for `k` samples therefore sees `k` or
/// fewer neighbors; the tuned constants assume that effective count.
pub(crate) fn sample_neighbor(index: usize, len: usize, rng: &mut ParticleRng) -> Option<usize> {
    rng.index(len).filter(|&j| j != index)
}
