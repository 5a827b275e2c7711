//! Simulation configuration (parsed from TOML) with per-mode constant blocks

use crate::boundary::Boundary;
use glyphflow_core::{GlyphError, Mode, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Constants for the fluid model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidConfig {
    /// Random neighbors drawn per particle per tick (with replacement)
    pub neighbor_samples: usize,
    pub interaction_radius: f32,
    /// Code differences below this attract, the rest repel
    pub similarity_threshold: u32,
    pub attraction: f32,
    /// Repulsion per unit of code difference
    pub repulsion: f32,
    pub friction: f32,
    pub max_velocity: f32,
    pub boundary: Boundary,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            neighbor_samples: 10,
            interaction_radius: 80.0,
            similarity_threshold: 10,
            attraction: 0.5,
            repulsion: 0.02,
            friction: 0.98,
            max_velocity: 3.0,
            boundary: Boundary::Wrap,
        }
    }
}

/// Constants for the gravity model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    /// Downward acceleration per tick, scaled by mass
    pub gravity: f32,
    pub air_resistance: f32,
    pub bounce_damping: f32,
    pub ground_friction: f32,
    /// Distance of the floor line above the bottom edge
    pub floor_offset: f32,
    /// Post-bounce vertical speeds below this snap to rest
    pub rest_threshold: f32,
    /// How far above the top edge a particle may travel before re-entering
    pub escape_margin: f32,
    /// Height above the top edge at which escaped particles re-enter
    pub respawn_height: f32,
    /// Horizontal speed range for re-entering particles
    pub respawn_spread: f32,
    pub max_velocity: f32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            gravity: 0.2,
            air_resistance: 0.99,
            bounce_damping: 0.7,
            ground_friction: 0.95,
            floor_offset: 20.0,
            rest_threshold: 0.5,
            escape_margin: 100.0,
            respawn_height: 20.0,
            respawn_spread: 1.0,
            max_velocity: 12.0,
        }
    }
}

/// Constants for the chaos model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaosConfig {
    /// Chance per particle per tick of a random impulse
    pub impulse_probability: f32,
    pub impulse_min: f32,
    pub impulse_max: f32,
    /// Pull toward the surface center per unit of distance
    pub center_pull: f32,
    pub friction: f32,
    pub max_velocity: f32,
    /// Velocity multiplier on wall contact, above 1
    pub bounce_energy: f32,
    /// Random kick on the orthogonal axis at wall contact
    pub bounce_jitter: f32,
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            impulse_probability: 0.02,
            impulse_min: 2.0,
            impulse_max: 6.0,
            center_pull: 0.0005,
            friction: 0.99,
            max_velocity: 8.0,
            bounce_energy: 1.05,
            bounce_jitter: 1.0,
        }
    }
}

/// Constants for the weather model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub vortex_count: usize,
    /// Base strength; each vortex gets a value within 20% of it
    pub vortex_strength: f32,
    pub vortex_radius: f32,
    /// Per-axis speed range for vortex drift
    pub vortex_speed: f32,
    pub wind_strength: f32,
    /// Seconds for the wind direction to turn a full circle
    pub wind_period: f32,
    pub friction: f32,
    pub max_velocity: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            vortex_count: 5,
            vortex_strength: 0.3,
            vortex_radius: 150.0,
            vortex_speed: 1.0,
            wind_strength: 0.02,
            wind_period: 5.0,
            friction: 0.97,
            max_velocity: 5.0,
        }
    }
}

/// Constants for the swarm model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub neighbor_samples: usize,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub separation_strength: f32,
    pub alignment_strength: f32,
    pub cohesion_strength: f32,
    pub noise: f32,
    pub friction: f32,
    pub max_velocity: f32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            neighbor_samples: 10,
            separation_radius: 20.0,
            alignment_radius: 50.0,
            cohesion_radius: 100.0,
            separation_strength: 0.1,
            alignment_strength: 0.05,
            cohesion_strength: 0.005,
            noise: 0.05,
            friction: 0.99,
            max_velocity: 3.0,
        }
    }
}

/// Top-level configuration for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub mode: Mode,
    /// Fixed seed for reproducible runs; absent means seeded from the OS
    pub seed: Option<u64>,
    pub target_fps: f64,
    /// Longest text the text source hands to the engine
    pub max_chars: usize,
    /// Opacity of the full-surface fill painted before each frame
    pub fade_alpha: f32,
    pub fluid: FluidConfig,
    pub gravity: GravityConfig,
    pub chaos: ChaosConfig,
    pub weather: WeatherConfig,
    pub swarm: SwarmConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Fluid,
            seed: None,
            target_fps: 60.0,
            max_chars: 5000,
            fade_alpha: 0.1,
            fluid: FluidConfig::default(),
            gravity: GravityConfig::default(),
            chaos: ChaosConfig::default(),
            weather: WeatherConfig::default(),
            swarm: SwarmConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject constants that would make a model unstable or meaningless
    pub fn validate(&self) -> Result<()> {
        check("target_fps", self.target_fps, 1e-3, 1000.0)?;
        check("fade_alpha", self.fade_alpha as f64, 0.0, 1.0)?;
        if self.max_chars == 0 {
            return Err(GlyphError::InvalidConfig(
                "max_chars must be at least 1".to_string(),
            ));
        }

        let f = &self.fluid;
        check_friction("fluid.friction", f.friction)?;
        check_speed("fluid.max_velocity", f.max_velocity)?;
        check_non_negative("fluid.interaction_radius", f.interaction_radius)?;
        check_non_negative("fluid.attraction", f.attraction)?;
        check_non_negative("fluid.repulsion", f.repulsion)?;

        let g = &self.gravity;
        check_friction("gravity.air_resistance", g.air_resistance)?;
        check_friction("gravity.ground_friction", g.ground_friction)?;
        check("gravity.bounce_damping", g.bounce_damping as f64, 0.0, 1.0)?;
        check_speed("gravity.max_velocity", g.max_velocity)?;
        check_non_negative("gravity.gravity", g.gravity)?;
        check_non_negative("gravity.floor_offset", g.floor_offset)?;
        check_non_negative("gravity.rest_threshold", g.rest_threshold)?;
        check_non_negative("gravity.respawn_spread", g.respawn_spread)?;
        check_non_negative("gravity.respawn_height", g.respawn_height)?;
        check_non_negative("gravity.escape_margin", g.escape_margin)?;
        if g.escape_margin <= g.respawn_height {
            return Err(GlyphError::InvalidConfig(format!(
                "gravity.escape_margin ({}) must exceed gravity.respawn_height ({})",
                g.escape_margin, g.respawn_height
            )));
        }

        let c = &self.chaos;
        check("chaos.impulse_probability", c.impulse_probability as f64, 0.0, 1.0)?;
        check_friction("chaos.friction", c.friction)?;
        check_speed("chaos.max_velocity", c.max_velocity)?;
        check_non_negative("chaos.impulse_min", c.impulse_min)?;
        check_non_negative("chaos.impulse_max", c.impulse_max)?;
        check_non_negative("chaos.center_pull", c.center_pull)?;
        check_non_negative("chaos.bounce_jitter", c.bounce_jitter)?;
        if c.impulse_max < c.impulse_min {
            return Err(GlyphError::InvalidConfig(
                "chaos.impulse_max must not be below chaos.impulse_min".to_string(),
            ));
        }
        check("chaos.bounce_energy", c.bounce_energy as f64, 1.0, 2.0)?;

        let w = &self.weather;
        check_friction("weather.friction", w.friction)?;
        check_speed("weather.max_velocity", w.max_velocity)?;
        check_non_negative("weather.vortex_strength", w.vortex_strength)?;
        check_non_negative("weather.vortex_radius", w.vortex_radius)?;
        check_non_negative("weather.vortex_speed", w.vortex_speed)?;
        check_non_negative("weather.wind_strength", w.wind_strength)?;
        check("weather.wind_period", w.wind_period as f64, 1e-3, f64::MAX)?;

        let s = &self.swarm;
        check_friction("swarm.friction", s.friction)?;
        check_speed("swarm.max_velocity", s.max_velocity)?;
        check_non_negative("swarm.separation_radius", s.separation_radius)?;
        check_non_negative("swarm.noise", s.noise)?;
        if !(s.separation_radius < s.alignment_radius && s.alignment_radius < s.cohesion_radius) {
            return Err(GlyphError::InvalidConfig(format!(
                "swarm radii must be nested: separation ({}) < alignment ({}) < cohesion ({})",
                s.separation_radius, s.alignment_radius, s.cohesion_radius
            )));
        }

        Ok(())
    }
}

fn check(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(GlyphError::out_of_range(field, min, max, value))
    }
}

fn check_friction(field: &str, value: f32) -> Result<()> {
    // Zero friction factor would freeze every particle
    check(field, value as f64, f64::MIN_POSITIVE, 1.0)
}

fn check_speed(field: &str, value: f32) -> Result<()> {
    check(field, value as f64, f64::MIN_POSITIVE, 1.0e4)
}

fn check_non_negative(field: &str, value: f32) -> Result<()> {
    check(field, value as f64, 0.0, f64::MAX)
}
