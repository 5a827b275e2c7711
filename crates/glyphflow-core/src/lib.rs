//! glyphflow Core - Foundational types for the glyph particle engine
//!
//! This crate provides the types that all other glyphflow crates depend on:
//! - `Mode` - The five physics modes
//! - `Surface` - Drawable extent used for placement and boundaries
//! - `Color` - RGBA color with HSL conversion for render sinks
//! - Error types and Result alias

mod error;
mod mode;
mod types;

pub use error::{GlyphError, Result};
pub use mode::Mode;
pub use types::{Color, Surface};
