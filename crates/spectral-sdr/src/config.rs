//! Frequency encoder configuration.
//!
//! [`FrequencyEncoderConfig`] is immutable once handed to a
//! [`FrequencyEncoder`](crate::encoder::FrequencyEncoder). It is serializable
//! via [`serde`] so tuned parameter sets can be stored as JSON next to the
//! models that consume the encodings.
//!
//! # Example
//!
//! ```rust
//! use spectral_sdr::config::FrequencyEncoderConfig;
//!
//! let cfg = FrequencyEncoderConfig::builder()
//!     .num_frequency_bins(8)
//!     .freq_bin_n(21)
//!     .freq_bin_w(3)
//!     .range(0.0, 14.0)
//!     .build();
//! cfg.validate().expect("config is valid");
//!
//! assert_eq!(cfg.output_width(), 168);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// How the raw FFT power is scaled before any compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerScaling {
    /// `|X[k]|^2` as computed. `maxval` must be calibrated per chunk size.
    #[default]
    Raw,
    /// `|X[k]|^2 / N`, which keeps magnitudes comparable across chunk sizes.
    PerSample,
}

/// Configuration of a [`FrequencyEncoder`](crate::encoder::FrequencyEncoder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEncoderConfig {
    /// Number of contiguous frequency bins the spectrum is split into.
    pub num_frequency_bins: usize,

    /// Bits per frequency bin. Must equal the scalar encoder's width.
    pub freq_bin_n: usize,

    /// Active bits per frequency bin.
    pub freq_bin_w: usize,

    /// Lower bound of the scalar encoder range.
    pub minval: f64,

    /// Upper bound of the scalar encoder range.
    pub maxval: f64,

    /// Apply `ln(1 + p)` compression to the power spectrum.
    #[serde(default = "default_true")]
    pub log: bool,

    /// Rescale each spectrum to `[minval, maxval]` using its own extrema.
    #[serde(default)]
    pub normalize: bool,

    /// Clamp values above `maxval` and emit a warning instead of failing.
    #[serde(default = "default_true")]
    pub clip_with_warning: bool,

    /// Scaling applied to the raw FFT power.
    #[serde(default)]
    pub power_scaling: PowerScaling,

    /// Keep only the lowest `n` spectrum entries before binning.
    #[serde(default)]
    pub frequency_cutoff: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for FrequencyEncoderConfig {
    /// Five 5-bit bins with one active bit over `[0.0, 7.9]`, calibrated for
    /// 100-sample chunks with log compression.
    fn default() -> Self {
        Self::new(5, 5, 1, 0.0, 7.9)
    }
}

impl FrequencyEncoderConfig {
    /// Create a configuration with the default flags (`log` and
    /// `clip_with_warning` on, `normalize` off).
    pub fn new(
        num_frequency_bins: usize,
        freq_bin_n: usize,
        freq_bin_w: usize,
        minval: f64,
        maxval: f64,
    ) -> Self {
        Self {
            num_frequency_bins,
            freq_bin_n,
            freq_bin_w,
            minval,
            maxval,
            log: true,
            normalize: false,
            clip_with_warning: true,
            power_scaling: PowerScaling::Raw,
            frequency_cutoff: None,
        }
    }

    /// Create a new config builder seeded with [`Default`] values.
    pub fn builder() -> FrequencyEncoderConfigBuilder {
        FrequencyEncoderConfigBuilder::new()
    }

    /// Total number of output bits, `num_frequency_bins * freq_bin_n`.
    pub fn output_width(&self) -> usize {
        self.num_frequency_bins * self.freq_bin_n
    }

    /// Load a configuration from a JSON file and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be read,
    /// [`ConfigError::Json`] if it is malformed and
    /// [`ConfigError::InvalidValue`] if a field is out of range.
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: FrequencyEncoderConfig = serde_json::from_str(&contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write this configuration to `path` as pretty-printed JSON, creating
    /// parent directories if necessary.
    pub fn to_json(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::FileRead {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Validate all fields, returning the first problem found.
    ///
    /// # Validated invariants
    ///
    /// - `num_frequency_bins` and `freq_bin_n` are non-zero.
    /// - `1 <= freq_bin_w <= freq_bin_n`.
    /// - `minval` and `maxval` are finite and `maxval > minval`.
    /// - `frequency_cutoff`, when set, is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_frequency_bins == 0 {
            return Err(ConfigError::invalid_value(
                "num_frequency_bins",
                "must be at least 1",
            ));
        }

        if self.freq_bin_n == 0 {
            return Err(ConfigError::invalid_value("freq_bin_n", "must be at least 1"));
        }

        if self.freq_bin_w == 0 || self.freq_bin_w > self.freq_bin_n {
            return Err(ConfigError::invalid_value(
                "freq_bin_w",
                format!(
                    "must be in [1, freq_bin_n = {}], got {}",
                    self.freq_bin_n, self.freq_bin_w
                ),
            ));
        }

        if !self.minval.is_finite() {
            return Err(ConfigError::invalid_value("minval", "must be finite"));
        }

        if !self.maxval.is_finite() {
            return Err(ConfigError::invalid_value("maxval", "must be finite"));
        }

        if self.maxval <= self.minval {
            return Err(ConfigError::invalid_value(
                "maxval",
                format!(
                    "must be greater than minval ({}), got {}",
                    self.minval, self.maxval
                ),
            ));
        }

        if self.frequency_cutoff == Some(0) {
            return Err(ConfigError::invalid_value(
                "frequency_cutoff",
                "must retain at least one spectrum entry",
            ));
        }

        Ok(())
    }
}

/// Builder for [`FrequencyEncoderConfig`].
#[derive(Debug, Default)]
pub struct FrequencyEncoderConfigBuilder {
    config: FrequencyEncoderConfig,
}

impl FrequencyEncoderConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: FrequencyEncoderConfig::default(),
        }
    }

    /// Set the number of frequency bins
    pub fn num_frequency_bins(mut self, bins: usize) -> Self {
        self.config.num_frequency_bins = bins;
        self
    }

    /// Set bits per bin
    pub fn freq_bin_n(mut self, n: usize) -> Self {
        self.config.freq_bin_n = n;
        self
    }

    /// Set active bits per bin
    pub fn freq_bin_w(mut self, w: usize) -> Self {
        self.config.freq_bin_w = w;
        self
    }

    /// Set the scalar encoder range
    pub fn range(mut self, minval: f64, maxval: f64) -> Self {
        self.config.minval = minval;
        self.config.maxval = maxval;
        self
    }

    /// Enable/disable log compression
    pub fn log(mut self, enable: bool) -> Self {
        self.config.log = enable;
        self
    }

    /// Enable/disable per-spectrum range normalization
    pub fn normalize(mut self, enable: bool) -> Self {
        self.config.normalize = enable;
        self
    }

    /// Enable/disable clipping with warning
    pub fn clip_with_warning(mut self, enable: bool) -> Self {
        self.config.clip_with_warning = enable;
        self
    }

    /// Set the power scaling convention
    pub fn power_scaling(mut self, scaling: PowerScaling) -> Self {
        self.config.power_scaling = scaling;
        self
    }

    /// Keep only the lowest `cutoff` spectrum entries
    pub fn frequency_cutoff(mut self, cutoff: Option<usize>) -> Self {
        self.config.frequency_cutoff = cutoff;
        self
    }

    /// Build the configuration
    pub fn build(self) -> FrequencyEncoderConfig {
        self.config
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
