//! Error types for the spectral encoder.
//!
//! # Error Hierarchy
//!
//! ```text
//! EncoderError
//! ├── ConfigError        (configuration validation / file loading)
//! └── ScalarEncodeError  (delegated scalar encoder construction / encoding)
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Convenient `Result` alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EncoderError>;

// ---------------------------------------------------------------------------
// EncoderError
// ---------------------------------------------------------------------------

/// Top-level error type for spectral encoding.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// The encoder configuration is invalid or could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scalar encoder delegate could not be constructed.
    #[error("Scalar encoder error: {0}")]
    ScalarEncoder(#[from] ScalarEncodeError),

    /// The signal chunk is not a usable numeric sequence.
    #[error("Invalid signal chunk: {0}")]
    InvalidInput(String),

    /// The caller-supplied output buffer cannot hold the encoding.
    #[error("Output buffer too short: need {required} bits, got {actual}")]
    OutputTooShort {
        /// Encoder output width.
        required: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// Splitting the spectrum would leave a frequency bin with no entries.
    #[error("Power spectrum of length {spectrum_len} cannot be split into {num_bins} frequency bins")]
    SpectrumTooShort {
        /// Length of the processed power spectrum.
        spectrum_len: usize,
        /// Configured number of frequency bins.
        num_bins: usize,
    },

    /// The scalar encoder rejected the representative value of a bin.
    #[error("Failed to encode frequency bin {bin}: {source}")]
    BinEncoding {
        /// Index of the offending frequency bin.
        bin: usize,
        /// Underlying delegate error.
        #[source]
        source: ScalarEncodeError,
    },
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors produced when loading or validating a
/// [`FrequencyEncoderConfig`](crate::config::FrequencyEncoderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value outside its legal domain.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// The configuration file could not be read or written.
    #[error("Failed to access config file {path}: {source}")]
    FileRead {
        /// Path that was accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this schema.
    #[error("Malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Construct an [`ConfigError::InvalidValue`].
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ScalarEncodeError
// ---------------------------------------------------------------------------

/// Errors raised by a [`ScalarEncoder`](crate::scalar::ScalarEncoder).
#[derive(Debug, Error)]
pub enum ScalarEncodeError {
    /// A construction parameter is invalid.
    #[error("Invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// The value lies outside the encoder's range and clipping is disabled.
    #[error("Input {value} outside encoder range [{minval}, {maxval}]")]
    OutOfRange {
        /// Rejected value.
        value: f64,
        /// Lower bound of the encoder range.
        minval: f64,
        /// Upper bound of the encoder range.
        maxval: f64,
    },

    /// The output slice does not match the encoder width.
    #[error("Output slice has {actual} bits, expected {expected}")]
    OutputSize {
        /// Encoder width.
        expected: usize,
        /// Supplied slice length.
        actual: usize,
    },
}
