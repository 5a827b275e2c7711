//! Swarm: separation, alignment and cohesion over sampled neighbors

use super::{sample_neighbor, StepContext};
use crate::boundary::Boundary;
use crate::config::SwarmConfig;
use crate::integrator::integrate;
use crate::particle::Particle;
use crate::rng::ParticleRng;
use glam::Vec2;

pub struct SwarmForce {
    pub config: SwarmConfig,
}

/// Running sums for the three flocking terms
#[derive(Default)]
struct Flock {
    separation: Vec2,
    separation_count: u32,
    alignment: Vec2,
    alignment_count: u32,
    cohesion: Vec2,
    cohesion_count: u32,
}

impl SwarmForce {
    pub fn new(config: SwarmConfig) -> Self {
        Self { config }
    }

    pub fn step(&mut self, particles: &mut [Particle], ctx: &StepContext, rng: &mut ParticleRng) {
        let len = particles.len();
        for i in 0..len {
            let flock = self.gather(i, particles, rng);
            let noise = rng.random_direction() * self.config.noise;

            let cfg = &self.config;
            let p = &mut particles[i];
            let steer = self.steering(&flock, p.velocity);
            p.velocity += steer + noise;
            p.velocity *= cfg.friction;
            integrate(p, cfg.max_velocity);
            Boundary::Wrap.apply(&mut p.position, &mut p.velocity, ctx.surface);
        }
    }

    /// Each sampled neighbor is tested against every radius on its own, so
    /// one neighbor can feed several terms
    fn gather(&self, i: usize, particles: &[Particle], rng: &mut ParticleRng) -> Flock {
        let cfg = &self.config;
        let p = &particles[i];
        let mut flock = Flock::default();

        for _ in 0..cfg.neighbor_samples {
            let Some(j) = sample_neighbor(i, particles.len(), rng) else {
                continue;
            };
            let other = &particles[j];
            let offset = other.position - p.position;
            let dist = offset.length();

            if dist > 0.0 && dist < cfg.separation_radius {
                flock.separation -= offset / dist;
                flock.separation_count += 1;
            }
            if dist < cfg.alignment_radius {
                flock.alignment += other.velocity;
                flock.alignment_count += 1;
            }
            if dist < cfg.cohesion_radius {
                flock.cohesion += offset;
                flock.cohesion_count += 1;
            }
        }
        flock
    }

    fn steering(&self, flock: &Flock, velocity: Vec2) -> Vec2 {
        let cfg = &self.config;
        let mut dv = Vec2::ZERO;
        if flock.separation_count > 0 {
            dv += flock.separation / flock.separation_count as f32 * cfg.separation_strength;
        }
        if flock.alignment_count > 0 {
            let average = flock.alignment / flock.alignment_count as f32;
            dv += (average - velocity) * cfg.alignment_strength;
        }
        if flock.cohesion_count > 0 {
            dv += flock.cohesion / flock.cohesion_count as f32 * cfg.cohesion_strength;
        }
        dv
    }
}
