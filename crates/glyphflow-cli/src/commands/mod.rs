//! CLI command implementations

pub mod config;
pub mod modes;
pub mod run;
