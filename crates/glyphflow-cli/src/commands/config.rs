//! Default configuration command

use anyhow::{Context, Result};
use glyphflow_particles::SimulationConfig;

pub fn run() -> Result<()> {
    let toml = SimulationConfig::default()
        .to_toml_string()
        .context("Failed to serialize default configuration")?;
    print!("{}", toml);
    Ok(())
}
