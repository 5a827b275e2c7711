//! Physics mode selection

use crate::error::GlyphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The physics model driving a run. Changing it requires a full reset.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Fluid,
    Gravity,
    Chaos,
    Weather,
    Swarm,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Fluid,
        Mode::Gravity,
        Mode::Chaos,
        Mode::Weather,
        Mode::Swarm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Fluid => "fluid",
            Mode::Gravity => "gravity",
            Mode::Chaos => "chaos",
            Mode::Weather => "weather",
            Mode::Swarm => "swarm",
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Mode::Fluid => "similar characters attract, dissimilar ones repel",
            Mode::Gravity => "characters fall, bounce on the floor and come to rest",
            Mode::Chaos => "random impulses and energetic wall bounces, never settles",
            Mode::Weather => "drifting vortices and a slowly turning wind",
            Mode::Swarm => "separation, alignment and cohesion flocking",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| GlyphError::UnknownMode {
                value: s.to_string(),
                allowed: Mode::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            })
    }
}
