//! Error types for configuration loading.
//!
//! The simulation itself never fails; only reading and validating the
//! run configuration can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the config file from disk
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has the wrong shape
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown boss '{0}' (expected one of circle, square, triangle, heart, oval, hexagon, hourglass, math, star, random)")]
    UnknownBoss(String),

    #[error("bullet speed scale {0} is outside [0.5, 2.0]")]
    InvalidSpeedScale(f32),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
