//! Seedable random source threaded through the engine

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Random source for placement, neighbor sampling and stochastic impulses.
///
/// A fixed seed makes a whole run reproducible; `from_entropy` is used when
/// no seed is configured.
pub struct ParticleRng {
    inner: StdRng,
}

impl ParticleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Returns a float between `min` and `max`, in whichever order they are
    /// given. Never panics; equal bounds return `min`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform index in `0..len`, or None when `len` is zero
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.random_range(0..len))
        }
    }

    /// Returns a unit vector with a uniformly random angle
    pub fn random_direction(&mut self) -> Vec2 {
        Vec2::from_angle(self.range(0.0, TAU))
    }

    /// Returns +1.0 or -1.0 with equal probability
    pub fn sign(&mut self) -> f32 {
        if self.chance(0.5) {
            1.0
        } else {
            -1.0
        }
    }

    /// Derive an independent seed, for handing a fresh stream to a new run
    pub fn next_seed(&mut self) -> u64 {
        self.inner.random::<u64>()
    }
}
