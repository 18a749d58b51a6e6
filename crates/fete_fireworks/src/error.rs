//! # Fireworks Error Types
//!
//! The frame loop itself cannot fail; only loading a show configuration can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring a fireworks show.
#[derive(Error, Debug)]
pub enum FireworksError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for fireworks operations.
pub type FireworksResult<T> = Result<T, FireworksError>;
