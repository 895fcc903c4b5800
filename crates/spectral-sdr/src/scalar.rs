//! Delegated scalar encoding.
//!
//! The frequency encoder does not decide how a single value becomes bits; it
//! hands each bin's representative value to a [`ScalarEncoder`]. The crate
//! ships [`LinearScalarEncoder`], a contiguous-run encoder whose active bits
//! slide from the first to the last position as the value moves across
//! `[minval, maxval]`.

use std::sync::Arc;

use crate::error::ScalarEncodeError;

/// Maps a real value to a fixed-width bit pattern.
pub trait ScalarEncoder {
    /// Number of output bits.
    fn width(&self) -> usize;

    /// Number of bits set in every encoding.
    fn active_bits(&self) -> usize;

    /// Encode `value` into `output`, which must be exactly [`width`](Self::width)
    /// long. Every bit of `output` is overwritten.
    fn encode_into(&self, value: f64, output: &mut [u8]) -> Result<(), ScalarEncodeError>;
}

impl<E: ScalarEncoder + ?Sized> ScalarEncoder for &E {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn active_bits(&self) -> usize {
        (**self).active_bits()
    }

    fn encode_into(&self, value: f64, output: &mut [u8]) -> Result<(), ScalarEncodeError> {
        (**self).encode_into(value, output)
    }
}

impl<E: ScalarEncoder + ?Sized> ScalarEncoder for Box<E> {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn active_bits(&self) -> usize {
        (**self).active_bits()
    }

    fn encode_into(&self, value: f64, output: &mut [u8]) -> Result<(), ScalarEncodeError> {
        (**self).encode_into(value, output)
    }
}

impl<E: ScalarEncoder + ?Sized> ScalarEncoder for Arc<E> {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn active_bits(&self) -> usize {
        (**self).active_bits()
    }

    fn encode_into(&self, value: f64, output: &mut [u8]) -> Result<(), ScalarEncodeError> {
        (**self).encode_into(value, output)
    }
}

/// Parameters for a [`LinearScalarEncoder`].
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScalarParams {
    /// Output width in bits.
    pub n: usize,
    /// Active bits, odd.
    pub w: usize,
    /// Lowest encodable value.
    pub minval: f64,
    /// Highest encodable value.
    pub maxval: f64,
    /// Clamp out-of-range inputs instead of rejecting them.
    pub clip_input: bool,
}

/// Contiguous-run scalar encoder over a closed range.
///
/// The range is divided into `n - w + 1` buckets of width
/// `resolution = (maxval - minval) / (n - w)`, centred on
/// `minval + k * resolution`. A value in bucket `k` sets bits `k..k + w`.
#[derive(Debug, Clone)]
pub struct LinearScalarEncoder {
    n: usize,
    w: usize,
    minval: f64,
    maxval: f64,
    resolution: f64,
    clip_input: bool,
}

impl LinearScalarEncoder {
    /// Create a new encoder.
    ///
    /// `w` must be odd so the run has a centre bit, and `w <= n`.
    pub fn new(params: LinearScalarParams) -> Result<Self, ScalarEncodeError> {
        let LinearScalarParams {
            n,
            w,
            minval,
            maxval,
            clip_input,
        } = params;

        if w == 0 || w % 2 == 0 {
            return Err(ScalarEncodeError::InvalidParameter {
                name: "w",
                message: format!("must be a positive odd number, got {w}"),
            });
        }

        if w > n {
            return Err(ScalarEncodeError::InvalidParameter {
                name: "n",
                message: format!("must be at least w = {w}, got {n}"),
            });
        }

        if !minval.is_finite() || !maxval.is_finite() || maxval <= minval {
            return Err(ScalarEncodeError::InvalidParameter {
                name: "maxval",
                message: format!("range [{minval}, {maxval}] is empty or not finite"),
            });
        }

        let resolution = if n > w {
            (maxval - minval) / (n - w) as f64
        } else {
            0.0
        };

        Ok(Self {
            n,
            w,
            minval,
            maxval,
            resolution,
            clip_input,
        })
    }

    /// Lower bound of the range.
    pub fn minval(&self) -> f64 {
        self.minval
    }

    /// Upper bound of the range.
    pub fn maxval(&self) -> f64 {
        self.maxval
    }

    /// Value distance between adjacent buckets.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Index of the first active bit for `value`.
    pub fn bucket_index(&self, value: f64) -> Result<usize, ScalarEncodeError> {
        let out_of_range = ScalarEncodeError::OutOfRange {
            value,
            minval: self.minval,
            maxval: self.maxval,
        };

        let value = if value.is_nan() {
            return Err(out_of_range);
        } else if value < self.minval || value > self.maxval {
            if !self.clip_input {
                return Err(out_of_range);
            }
            value.clamp(self.minval, self.maxval)
        } else {
            value
        };

        if self.n == self.w {
            return Ok(0);
        }

        let bucket = ((value - self.minval) / self.resolution + 0.5).floor() as usize;
        Ok(bucket.min(self.n - self.w))
    }
}

impl ScalarEncoder for LinearScalarEncoder {
    fn width(&self) -> usize {
        self.n
    }

    fn active_bits(&self) -> usize {
        self.w
    }

    fn encode_into(&self, value: f64, output: &mut [u8]) -> Result<(), ScalarEncodeError> {
        if output.len() != self.n {
            return Err(ScalarEncodeError::OutputSize {
                expected: self.n,
                actual: output.len(),
            });
        }

        let first = self.bucket_index(value)?;
        output.fill(0);
        output[first..first + self.w].fill(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn encoder(n: usize, w: usize, minval: f64, maxval: f64) -> LinearScalarEncoder {
        LinearScalarEncoder::new(LinearScalarParams {
            n,
            w,
            minval,
            maxval,
            clip_input: false,
        })
        .unwrap()
    }

    fn encode(enc: &LinearScalarEncoder, value: f64) -> Vec<u8> {
        let mut out = vec![0; enc.width()];
        enc.encode_into(value, &mut out).unwrap();
        out
    }

    #[test]
    fn reference_bucket_boundaries() {
        let enc = encoder(5, 1, 0.0, 7.9);
        assert_abs_diff_eq!(enc.resolution(), 1.975, epsilon = 1e-12);

        assert_eq!(enc.bucket_index(0.0).unwrap(), 0);
        assert_eq!(enc.bucket_index(0.98).unwrap(), 0);
        assert_eq!(enc.bucket_index(0.99).unwrap(), 1);
        assert_eq!(enc.bucket_index(2.941).unwrap(), 1);
        assert_eq!(enc.bucket_index(3.0).unwrap(), 2);
        assert_eq!(enc.bucket_index(6.421).unwrap(), 3);
        assert_eq!(enc.bucket_index(6.95).unwrap(), 4);
        assert_eq!(enc.bucket_index(7.9).unwrap(), 4);
    }

    #[test]
    fn run_of_w_bits() {
        let enc = encoder(21, 5, 0.0, 16.0);
        for value in [0.0, 3.3, 8.0, 15.9, 16.0] {
            let bits = encode(&enc, value);
            assert_eq!(bits.len(), 21);
            assert_eq!(bits.iter().filter(|&&b| b == 1).count(), 5);
            let first = bits.iter().position(|&b| b == 1).unwrap();
            assert!(bits[first..first + 5].iter().all(|&b| b == 1));
        }
        assert_eq!(&encode(&enc, 0.0)[..5], &[1, 1, 1, 1, 1]);
        assert_eq!(&encode(&enc, 16.0)[16..], &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn position_is_monotonic_in_value() {
        let enc = encoder(40, 3, -2.0, 2.0);
        let mut last = 0;
        for step in 0..=400 {
            let value = -2.0 + step as f64 * 0.01;
            let idx = enc.bucket_index(value.min(2.0)).unwrap();
            assert!(idx >= last, "bucket decreased at {value}");
            last = idx;
        }
        assert_eq!(last, 37);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let enc = encoder(5, 1, 0.0, 7.9);
        assert!(matches!(
            enc.bucket_index(8.0),
            Err(ScalarEncodeError::OutOfRange { .. })
        ));
        assert!(enc.bucket_index(-0.1).is_err());
        assert!(enc.bucket_index(f64::NAN).is_err());
    }

    #[test]
    fn clip_input_clamps() {
        let enc = LinearScalarEncoder::new(LinearScalarParams {
            n: 5,
            w: 1,
            minval: 0.0,
            maxval: 7.9,
            clip_input: true,
        })
        .unwrap();
        assert_eq!(enc.bucket_index(100.0).unwrap(), 4);
        assert_eq!(enc.bucket_index(-3.0).unwrap(), 0);
    }

    #[test]
    fn full_width_run_sets_every_bit() {
        let enc = encoder(3, 3, 0.0, 1.0);
        assert_eq!(encode(&enc, 0.7), vec![1, 1, 1]);
    }

    #[test]
    fn invalid_parameters() {
        let params = LinearScalarParams {
            n: 10,
            w: 2,
            minval: 0.0,
            maxval: 1.0,
            clip_input: false,
        };
        assert!(LinearScalarEncoder::new(params.clone()).is_err());
        assert!(LinearScalarEncoder::new(LinearScalarParams { w: 11, ..params.clone() }).is_err());
        assert!(LinearScalarEncoder::new(LinearScalarParams { w: 3, maxval: 0.0, ..params }).is_err());
    }

    #[test]
    fn wrong_output_length() {
        let enc = encoder(5, 1, 0.0, 1.0);
        let mut out = vec![0; 4];
        assert!(matches!(
            enc.encode_into(0.5, &mut out),
            Err(ScalarEncodeError::OutputSize { expected: 5, actual: 4 })
        ));
    }

    #[test]
    fn works_through_smart_pointers() {
        let enc = Arc::new(encoder(5, 1, 0.0, 1.0));
        let boxed: Box<dyn ScalarEncoder> = Box::new(encoder(5, 1, 0.0, 1.0));
        let mut a = vec![0; 5];
        let mut b = vec![0; 5];
        enc.encode_into(1.0, &mut a).unwrap();
        boxed.encode_into(1.0, &mut b).unwrap();
        assert_eq!(a, b);
        assert_eq!((&enc).width(), 5);
    }
}
