//! # Effects Error Types
//!
//! Only construction can fail. Once mounted, simulators absorb every
//! runtime problem (missing container, removed element) as a no-op.

use thiserror::Error;

/// Errors raised while loading configuration or mounting effects.
#[derive(Error, Debug)]
pub enum FxError {
    /// A `[min, max]` range in the configuration is empty or inverted.
    #[error("invalid range for {name}: min {min} is greater than max {max}")]
    InvalidRange {
        /// Dotted path of the offending field.
        name: &'static str,
        /// Configured minimum.
        min: f32,
        /// Configured maximum.
        max: f32,
    },

    /// A configuration value is out of its allowed domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A section must mount between one and three effect layers.
    #[error("section {section} mounts {count} effect layers, expected 1 to {max}")]
    InvalidLayerCount {
        /// Section name.
        section: String,
        /// Number of layers requested.
        count: usize,
        /// Upper bound.
        max: usize,
    },

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// File path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the schema.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for effect construction.
pub type FxResult<T> = Result<T, FxError>;
