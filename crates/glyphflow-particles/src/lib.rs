//! Glyphflow Particles - text rendered as a field of physical glyphs
//!
//! Every visible character of an input string becomes a particle whose
//! physical attributes derive from its code point. A run advances them
//! under one of five force models:
//! - Fluid: code-point similarity attracts, difference repels
//! - Gravity: falling glyphs that bounce and settle on a floor
//! - Chaos: random impulses, a weak center pull, energetic walls
//! - Weather: drifting vortices and a slowly turning wind
//! - Swarm: separation, alignment and cohesion
//!
//! Frames are handed to a [`render::RenderSink`]; the engine never draws.

pub mod animation;
pub mod boundary;
pub mod config;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod particle;
pub mod render;
pub mod rng;

pub use animation::{Animation, FrameOutcome, RunStats};
pub use boundary::Boundary;
pub use config::SimulationConfig;
pub use engine::{EngineStats, SimulationEngine};
pub use forces::{ForceModel, StepContext};
pub use particle::{spawn_particles, GlyphInstance, Particle};
pub use render::{FrameView, GridSink, NullSink, RenderSink};
pub use rng::ParticleRng;
