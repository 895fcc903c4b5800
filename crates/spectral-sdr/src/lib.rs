//! Spectral SDR encoding
//!
//! This crate turns fixed-length time-series chunks into fixed-width binary
//! feature vectors for sparse-distributed-representation learners. A chunk's
//! power spectrum is split into contiguous frequency bins, each bin is reduced
//! to its peak power and the peaks are encoded as contiguous runs of active
//! bits.
//!
//! # Pipeline
//!
//! 1. **Spectral transform** ([`spectrum`]): one-sided FFT power,
//!    optional low-frequency cutoff, `ln(1 + p)` compression and per-spectrum
//!    range normalization.
//! 2. **Bin encoding** ([`encoder`]): clipping with a warning, contiguous
//!    binning with the remainder dropped, per-bin maximum, delegated scalar
//!    encoding and concatenation.
//!
//! # Example
//!
//! ```rust
//! use spectral_sdr::{FrequencyEncoder, FrequencyEncoderConfig};
//! use std::f64::consts::PI;
//!
//! let config = FrequencyEncoderConfig::builder()
//!     .num_frequency_bins(5)
//!     .freq_bin_n(5)
//!     .freq_bin_w(1)
//!     .range(0.0, 7.9)
//!     .build();
//! let encoder = FrequencyEncoder::new(config).unwrap();
//!
//! let chunk: Vec<f64> = (0..100)
//!     .map(|i| (2.0 * PI * 5.0 * i as f64 / 100.0).sin())
//!     .collect();
//! let mut output = vec![0u8; encoder.width()];
//! encoder.encode_into(&chunk, &mut output).unwrap();
//!
//! assert_eq!(&output[..5], &[0, 0, 0, 0, 1]);
//! ```

pub mod chunk;
pub mod config;
pub mod encoder;
pub mod error;
pub mod pretty;
pub mod scalar;
pub mod spectrum;

pub use chunk::{SignalChunk, MISSING_DATA};
pub use config::{FrequencyEncoderConfig, FrequencyEncoderConfigBuilder, PowerScaling};
pub use encoder::{bin_maxima, EncodeSummary, FrequencyEncoder};
pub use error::{ConfigError, EncoderError, Result, ScalarEncodeError};
pub use scalar::{LinearScalarEncoder, LinearScalarParams, ScalarEncoder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chunk::{SignalChunk, MISSING_DATA};
    pub use crate::config::{FrequencyEncoderConfig, PowerScaling};
    pub use crate::encoder::{EncodeSummary, FrequencyEncoder};
    pub use crate::scalar::ScalarEncoder;
    pub use crate::{EncoderError, Result};
}
