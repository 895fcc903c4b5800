//! Frequency bin encoder.
//!
//! [`FrequencyEncoder`] pairs an immutable [`FrequencyEncoderConfig`] with a
//! [`ScalarEncoder`] delegate. Each call to
//! [`encode_into`](FrequencyEncoder::encode_into) is independent: the chunk is
//! transformed into a power spectrum, split into `num_frequency_bins`
//! contiguous bins, each bin is reduced to its maximum and the maxima are
//! encoded side by side.
//!
//! # Example
//!
//! ```rust
//! use spectral_sdr::{FrequencyEncoder, FrequencyEncoderConfig, MISSING_DATA};
//!
//! let encoder = FrequencyEncoder::new(FrequencyEncoderConfig::default()).unwrap();
//! assert_eq!(encoder.width(), 25);
//!
//! let silence = vec![0.0; 100];
//! let bits = encoder.encode(&silence).unwrap();
//! assert_eq!(bits.iter().filter(|&&b| b == 1).count(), 5);
//!
//! let missing = encoder.encode(MISSING_DATA).unwrap();
//! assert!(missing.iter().all(|&b| b == 0));
//! ```

use crate::chunk::{validate_samples, SignalChunk};
use crate::config::FrequencyEncoderConfig;
use crate::error::{ConfigError, EncoderError, Result};
use crate::pretty;
use crate::scalar::{LinearScalarEncoder, LinearScalarParams, ScalarEncoder};
use crate::spectrum;

/// Outcome of a successful encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSummary {
    /// The chunk was the missing-data sentinel and the output was zeroed.
    pub missing_data: bool,
    /// Number of spectrum entries clamped down to `maxval`.
    pub clipped: usize,
}

/// Spectral feature encoder.
#[derive(Debug, Clone)]
pub struct FrequencyEncoder<S = LinearScalarEncoder> {
    config: FrequencyEncoderConfig,
    scalar: S,
}

impl FrequencyEncoder<LinearScalarEncoder> {
    /// Create an encoder whose bins are encoded by a [`LinearScalarEncoder`]
    /// over `[minval, maxval]`.
    ///
    /// The delegate does not clip; out-of-range values are handled by
    /// `clip_with_warning` or rejected.
    pub fn new(config: FrequencyEncoderConfig) -> Result<Self> {
        config.validate()?;
        let scalar = LinearScalarEncoder::new(LinearScalarParams {
            n: config.freq_bin_n,
            w: config.freq_bin_w,
            minval: config.minval,
            maxval: config.maxval,
            clip_input: false,
        })?;
        Ok(Self { config, scalar })
    }
}

impl<S: ScalarEncoder> FrequencyEncoder<S> {
    /// Create an encoder with a caller-supplied scalar encoder.
    ///
    /// The delegate must be `freq_bin_n` bits wide with `freq_bin_w` active bits.
    pub fn with_scalar_encoder(config: FrequencyEncoderConfig, scalar: S) -> Result<Self> {
        config.validate()?;
        if scalar.width() != config.freq_bin_n {
            return Err(ConfigError::invalid_value(
                "freq_bin_n",
                format!(
                    "is {} but the scalar encoder produces {} bits",
                    config.freq_bin_n,
                    scalar.width()
                ),
            )
            .into());
        }
        if scalar.active_bits() != config.freq_bin_w {
            return Err(ConfigError::invalid_value(
                "freq_bin_w",
                format!(
                    "is {} but the scalar encoder sets {} bits",
                    config.freq_bin_w,
                    scalar.active_bits()
                ),
            )
            .into());
        }
        Ok(Self { config, scalar })
    }

    /// Output width in bits, `num_frequency_bins * freq_bin_n`.
    pub fn width(&self) -> usize {
        self.config.output_width()
    }

    /// The configuration this encoder was built with.
    pub fn config(&self) -> &FrequencyEncoderConfig {
        &self.config
    }

    /// The scalar encoder delegate.
    pub fn scalar_encoder(&self) -> &S {
        &self.scalar
    }

    /// Processed power spectrum of `samples`, before clipping.
    pub fn spectrum(&self, samples: &[f64]) -> Result<Vec<f64>> {
        validate_samples(samples)?;
        Ok(spectrum::process(samples, &self.config))
    }

    /// Encode `chunk` into a freshly allocated vector of [`width`](Self::width) bits.
    pub fn encode<'a>(&self, chunk: impl Into<SignalChunk<'a>>) -> Result<Vec<u8>> {
        let mut output = vec![0; self.width()];
        self.encode_into(chunk, &mut output)?;
        Ok(output)
    }

    /// Encode `chunk` into the first [`width`](Self::width) bits of `output`.
    ///
    /// On error `output` is left untouched.
    pub fn encode_into<'a>(
        &self,
        chunk: impl Into<SignalChunk<'a>>,
        output: &mut [u8],
    ) -> Result<EncodeSummary> {
        let width = self.width();
        if output.len() < width {
            return Err(EncoderError::OutputTooShort {
                required: width,
                actual: output.len(),
            });
        }

        let samples = match chunk.into() {
            SignalChunk::Missing => {
                tracing::trace!(width, "Missing data, emitting empty encoding");
                output[..width].fill(0);
                return Ok(EncodeSummary {
                    missing_data: true,
                    clipped: 0,
                });
            }
            SignalChunk::Samples(samples) => samples,
        };

        validate_samples(samples)?;
        let mut power = spectrum::process(samples, &self.config);

        let clipped = if self.config.clip_with_warning {
            spectrum::clip_above(&mut power, self.config.maxval)
        } else {
            0
        };
        if clipped > 0 {
            tracing::warn!(
                clipped,
                maxval = self.config.maxval,
                "Clipped {} power spectrum values above maxval {}",
                clipped,
                self.config.maxval
            );
        }

        let maxima = bin_maxima(&power, self.config.num_frequency_bins)?;

        let n = self.config.freq_bin_n;
        let mut encoded = vec![0u8; width];
        for (bin, (&value, slot)) in maxima.iter().zip(encoded.chunks_exact_mut(n)).enumerate() {
            self.scalar
                .encode_into(value, slot)
                .map_err(|source| EncoderError::BinEncoding { bin, source })?;
        }

        output[..width].copy_from_slice(&encoded);
        Ok(EncodeSummary {
            missing_data: false,
            clipped,
        })
    }

    /// Render an encoding produced by this encoder one bin per line, or
    /// `None` if `encoding` is shorter than [`width`](Self::width).
    pub fn pretty(&self, encoding: &[u8]) -> Option<String> {
        pretty::format_encoding(
            encoding,
            self.config.num_frequency_bins,
            self.config.freq_bin_n,
        )
    }
}

/// Split `spectrum` into `num_bins` contiguous bins of
/// `spectrum.len() / num_bins` entries and return the maximum of each.
///
/// Trailing entries that do not fill a whole bin are ignored.
pub fn bin_maxima(spectrum: &[f64], num_bins: usize) -> Result<Vec<f64>> {
    let bin_size = if num_bins == 0 {
        0
    } else {
        spectrum.len() / num_bins
    };
    if bin_size == 0 {
        return Err(EncoderError::SpectrumTooShort {
            spectrum_len: spectrum.len(),
            num_bins,
        });
    }

    Ok(spectrum
        .chunks_exact(bin_size)
        .take(num_bins)
        .map(|bin| bin.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        .collect())
}
