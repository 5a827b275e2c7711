//! Mode listing command

use anyhow::Result;
use glyphflow_core::Mode;

pub fn run() -> Result<()> {
    for mode in Mode::ALL {
        let default = if mode == Mode::default() { " (default)" } else { "" };
        println!("{:<8} {}{}", mode.as_str(), mode.description(), default);
    }
    Ok(())
}
