//! Error types for the ray caster and its configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Caller contract violations rejected by [`crate::cast_rays`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CastError {
    #[error("resolution must be at least 1")]
    ZeroResolution,

    #[error("max distance must be positive and finite, got {0}")]
    InvalidMaxDistance(f32),

    #[error("origin must have finite coordinates, got ({x}, {y})")]
    NonFiniteOrigin { x: f32, y: f32 },
}

/// Errors raised while loading or validating a [`crate::Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T, E = CastError> = std::result::Result<T, E>;
