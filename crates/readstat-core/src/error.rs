//! Error types for readstat-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors loading an external linguistic resource.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The resource file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A dictionary was already installed in this process.
    #[error("a pronunciation dictionary is already installed")]
    AlreadyInstalled,
}

/// Result type alias using [`ResourceError`].
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors raised by the counting and formula layers.
///
/// Degenerate input (empty text, zero words) is not an error: the affected
/// ratio recovers to `0.0` at the division site instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    /// A language configuration key is missing from both the resolved root
    /// and the `en` defaults.
    #[error("unknown language config key: {key}")]
    UnknownConfigKey {
        /// The key that was requested.
        key: String,
    },

    /// A formula variant selector is outside the valid set.
    #[error("{formula} has no variant {variant} (valid: 1-4)")]
    InvalidVariant {
        /// The formula that rejected the variant.
        formula: &'static str,
        /// The variant that was requested.
        variant: u8,
    },

    /// An unknown formula name was provided.
    #[error("unknown formula: {name}. Use: {available}")]
    UnknownFormula {
        /// The formula name that was requested.
        name: String,
        /// Comma-separated list of available formula names.
        available: String,
    },

    /// An unknown memoized counter name was provided.
    #[error("unknown counter: {name}. Use: {available}")]
    UnknownCounter {
        /// The counter name that was requested.
        name: String,
        /// Comma-separated list of counter names.
        available: String,
    },
}

/// Result type alias using [`StatError`].
pub type StatResult<T> = Result<T, StatError>;
