//! Error types for glyphflow

use thiserror::Error;

/// The main error type for glyphflow operations
///
/// The physics core itself never fails; these variants cover the edges
/// around it (configuration, mode selection, file input).
#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("Unknown mode: {value} is not one of {allowed:?}")]
    UnknownMode {
        value: String,
        allowed: Vec<String>,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for glyphflow operations
pub type Result<T> = std::result::Result<T, GlyphError>;

impl From<toml::de::Error> for GlyphError {
    fn from(err: toml::de::Error) -> Self {
        GlyphError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for GlyphError {
    fn from(err: toml::ser::Error) -> Self {
        GlyphError::TomlSerError(err.to_string())
    }
}

impl GlyphError {
    /// Build a `ValueOutOfRange` error for a named configuration field
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        GlyphError::ValueOutOfRange {
            field: field.into(),
            min,
            max,
            value,
        }
    }
}
