//! Spectral transform stage.
//!
//! Turns a real-valued chunk into a one-sided power spectrum of length
//! `N/2 + 1`, then applies the optional cutoff, log compression and range
//! normalization selected by the [`FrequencyEncoderConfig`].

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::config::{FrequencyEncoderConfig, PowerScaling};

/// Compute the one-sided power spectrum `|X[k]|^2` for `k = 0..=N/2`.
///
/// With [`PowerScaling::PerSample`] each entry is divided by `N`.
/// An empty signal yields an empty spectrum.
pub fn power_spectrum(signal: &[f64], scaling: PowerScaling) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex64> = signal.iter().map(|&s| Complex64::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    let divisor = match scaling {
        PowerScaling::Raw => 1.0,
        PowerScaling::PerSample => n as f64,
    };

    buffer[..n / 2 + 1]
        .iter()
        .map(|c| c.norm_sqr() / divisor)
        .collect()
}

/// Replace every entry with `ln(1 + p)`.
pub fn log_compress(power: &mut [f64]) {
    for p in power.iter_mut() {
        *p = p.ln_1p();
    }
}

/// Rescale `power` linearly so its minimum maps to `minval` and its maximum
/// to `maxval`.
///
/// Results are clamped to `[minval, maxval]` so rounding cannot push the
/// extrema outside the range. A flat spectrum has no range to stretch; every
/// entry becomes `minval` and `false` is returned.
pub fn normalize_range(power: &mut [f64], minval: f64, maxval: f64) -> bool {
    let (lo, hi) = power
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    let span = hi - lo;

    if power.is_empty() || span <= 0.0 || !span.is_finite() {
        power.fill(minval);
        return false;
    }

    for p in power.iter_mut() {
        *p = (minval + (*p - lo) / span * (maxval - minval)).clamp(minval, maxval);
    }
    true
}

/// Clamp every entry above `maxval` down to `maxval`, returning how many
/// entries were clipped.
pub fn clip_above(power: &mut [f64], maxval: f64) -> usize {
    let mut clipped = 0;
    for p in power.iter_mut().filter(|p| **p > maxval) {
        *p = maxval;
        clipped += 1;
    }
    clipped
}

/// Run the full spectral transform for `signal` under `config`.
///
/// Order: FFT power, frequency cutoff, log compression, normalization.
/// Clipping belongs to the bin encoder and is not applied here.
pub fn process(signal: &[f64], config: &FrequencyEncoderConfig) -> Vec<f64> {
    let mut power = power_spectrum(signal, config.power_scaling);

    if let Some(cutoff) = config.frequency_cutoff {
        power.truncate(cutoff);
    }

    if config.log {
        log_compress(&mut power);
    }

    if config.normalize && !normalize_range(&mut power, config.minval, config.maxval) {
        tracing::debug!(
            len = power.len(),
            minval = config.minval,
            "Flat power spectrum, normalized to minval"
        );
    }

    power
}
