//! The simulation engine: owns the particles and the active force model

use crate::config::SimulationConfig;
use crate::forces::{ForceModel, StepContext, VortexField};
use crate::particle::{spawn_particles, GlyphInstance, Particle};
use crate::rng::ParticleRng;
use glyphflow_core::{Mode, Surface};
use serde::Serialize;
use std::time::Duration;

/// Snapshot of a run for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStats {
    pub mode: Mode,
    pub particles: usize,
    pub ticks: u64,
    /// Mean of `vx^2 + vy^2` over all particles, 0 for an empty run
    pub kinetic_energy: f32,
    pub max_speed: f32,
    pub vortices: usize,
}

/// Owns one run's particle buffer, force model and random source.
///
/// Nothing outside the engine holds onto the particles: readers borrow a
/// slice, and a reset means building a new engine.
pub struct SimulationEngine {
    particles: Vec<Particle>,
    force: ForceModel,
    surface: Surface,
    rng: ParticleRng,
    ticks: u64,
    instances: Vec<GlyphInstance>,
}

impl SimulationEngine {
    /// Build a run from `text` in `mode`, using that mode's constants
    pub fn new(
        text: &str,
        mode: Mode,
        config: &SimulationConfig,
        surface: Surface,
        mut rng: ParticleRng,
    ) -> Self {
        let particles = spawn_particles(text, surface, &mut rng);
        let force = ForceModel::from_config(mode, config, surface, &mut rng);
        log::info!(
            "{} engine: {} particles on {}x{} surface",
            mode,
            particles.len(),
            surface.width,
            surface.height
        );
        Self::from_parts(particles, force, surface, rng)
    }

    /// Assemble an engine from prepared particles and a model
    pub fn from_parts(
        particles: Vec<Particle>,
        force: ForceModel,
        surface: Surface,
        rng: ParticleRng,
    ) -> Self {
        Self {
            instances: Vec::with_capacity(particles.len()),
            particles,
            force,
            surface,
            rng,
            ticks: 0,
        }
    }

    /// Advance every particle by one step. `elapsed` is wall-clock time
    /// since the run started.
    pub fn tick(&mut self, elapsed: Duration) {
        let ctx = StepContext {
            surface: self.surface,
            elapsed,
        };
        self.force.step(&mut self.particles, &ctx, &mut self.rng);
        self.ticks += 1;
    }

    /// Change the extent used by future boundary corrections. Existing
    /// positions are left where they are.
    pub fn resize(&mut self, surface: Surface) {
        log::debug!(
            "resize {}x{} -> {}x{}",
            self.surface.width,
            self.surface.height,
            surface.width,
            surface.height
        );
        self.surface = surface;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn mode(&self) -> Mode {
        self.force.mode()
    }

    pub fn max_velocity(&self) -> f32 {
        self.force.max_velocity()
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn vortex_field(&self) -> Option<&VortexField> {
        self.force.vortex_field()
    }

    /// Mean squared speed across all particles
    pub fn kinetic_energy(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        let total: f32 = self.particles.iter().map(|p| p.speed_squared()).sum();
        total / self.particles.len() as f32
    }

    /// Pack the current particle state into the reused instance buffer
    pub fn pack_instances(&mut self) -> &[GlyphInstance] {
        self.instances.clear();
        self.instances
            .extend(self.particles.iter().map(GlyphInstance::from_particle));
        &self.instances
    }

    /// Instances from the last `pack_instances` call
    pub fn instance_data(&self) -> &[GlyphInstance] {
        &self.instances
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            mode: self.mode(),
            particles: self.particles.len(),
            ticks: self.ticks,
            kinetic_energy: self.kinetic_energy(),
            max_speed: self
                .particles
                .iter()
                .map(|p| p.velocity.length())
                .fold(0.0, f32::max),
            vortices: self.vortex_field().map_or(0, VortexField::len),
        }
    }
}
