//! Signal chunk input type.
//!
//! A chunk is either a borrowed run of samples or the [`MISSING_DATA`]
//! sentinel, which tells the encoder that no data is available for this call.

use crate::error::{EncoderError, Result};

/// One fixed-length slice of a time series, or the missing-data sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalChunk<'a> {
    /// Real-valued samples, oldest first.
    Samples(&'a [f64]),
    /// No data available for this call.
    Missing,
}

/// Sentinel value signalling "no data for this chunk".
pub const MISSING_DATA: SignalChunk<'static> = SignalChunk::Missing;

impl<'a> SignalChunk<'a> {
    /// Returns `true` if this chunk equals [`MISSING_DATA`].
    pub fn is_missing(&self) -> bool {
        *self == MISSING_DATA
    }

    /// Number of samples, `0` for the sentinel.
    pub fn len(&self) -> usize {
        match self {
            SignalChunk::Samples(samples) => samples.len(),
            SignalChunk::Missing => 0,
        }
    }

    /// Returns `true` if the chunk carries no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [f64]> for SignalChunk<'a> {
    fn from(samples: &'a [f64]) -> Self {
        SignalChunk::Samples(samples)
    }
}

impl<'a> From<&'a Vec<f64>> for SignalChunk<'a> {
    fn from(samples: &'a Vec<f64>) -> Self {
        SignalChunk::Samples(samples.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for SignalChunk<'a> {
    fn from(samples: &'a [f64; N]) -> Self {
        SignalChunk::Samples(samples.as_slice())
    }
}

impl<'a> From<Option<&'a [f64]>> for SignalChunk<'a> {
    fn from(samples: Option<&'a [f64]>) -> Self {
        samples.map_or(MISSING_DATA, SignalChunk::Samples)
    }
}

/// Reject chunks that are not a concrete numeric sequence.
///
/// An empty chunk has no spectrum, and NaN or infinite samples would poison
/// every frequency bin.
pub(crate) fn validate_samples(samples: &[f64]) -> Result<()> {
    if samples.is_empty() {
        return Err(EncoderError::InvalidInput(
            "signal chunk contains no samples".into(),
        ));
    }

    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(EncoderError::InvalidInput(format!(
            "sample {} is not finite ({})",
            index, samples[index]
        )));
    }

    Ok(())
}
