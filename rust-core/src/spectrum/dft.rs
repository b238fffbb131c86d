//! Discrete Fourier transform by direct summation
//!
//! Both directions are O(N²). Reference fixtures were generated with the
//! same summation order, so no fast transform is used here.

use num_complex::Complex64;
use std::f64::consts::PI;

use super::analysis::SpectrumAnalysis;
use super::Spectrum;
use crate::error::{Result, SignalError};
use crate::signal::{algebra, Signal};

/// Forward DFT: `X[k] = Σ x[n] e^(-i 2π k n / N)`
///
/// # Errors
/// `EmptyInput` when `samples` is empty.
pub fn forward(samples: &[f64]) -> Result<Spectrum> {
    let len = samples.len();
    if len == 0 {
        return Err(SignalError::EmptyInput {
            operation: "forward DFT",
        });
    }

    tracing::debug!(samples = len, "computing forward DFT");

    let bins = (0..len)
        .map(|k| {
            samples
                .iter()
                .enumerate()
                .fold(Complex64::new(0.0, 0.0), |acc, (n, &x)| {
                    acc + twiddle(n, k, len, -1.0) * x
                })
        })
        .collect();

    Ok(Spectrum::new(bins))
}

/// Inverse DFT: `x[n] = (1/N) Σ X[k] e^(+i 2π k n / N)`, real part only
///
/// Output is not rounded; see [`TransformConfig::round_reconstruction`].
///
/// # Errors
/// `EmptyInput` when `spectrum` has no bins.
pub fn inverse(spectrum: &Spectrum) -> Result<Vec<f64>> {
    let bins = spectrum.bins();
    let len = bins.len();
    if len == 0 {
        return Err(SignalError::EmptyInput {
            operation: "inverse DFT",
        });
    }

    tracing::debug!(bins = len, "computing inverse DFT");

    let scale = len as f64;
    let samples = (0..len)
        .map(|n| {
            let sum = bins
                .iter()
                .enumerate()
                .fold(Complex64::new(0.0, 0.0), |acc, (k, &bin)| {
                    acc + bin * twiddle(n, k, len, 1.0)
                });
            sum.re / scale
        })
        .collect();

    Ok(samples)
}

/// `e^(sign * i 2π n k / N)`
#[inline]
fn twiddle(n: usize, k: usize, len: usize, sign: f64) -> Complex64 {
    let angle = 2.0 * PI * n as f64 * k as f64 / len as f64;
    Complex64::from_polar(1.0, sign * angle)
}

/// Transform post-processing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformConfig {
    /// Present amplitudes scaled to [0, 1] by the peak magnitude
    pub normalize_amplitude: bool,

    /// Round reconstructed samples to the nearest integer
    pub round_reconstruction: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            normalize_amplitude: true,
            round_reconstruction: false,
        }
    }
}

/// Forward/inverse transform pair with configurable post-processing
#[derive(Debug, Clone, Default)]
pub struct DftEngine {
    config: TransformConfig,
}

impl DftEngine {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Transform a time-domain signal
    ///
    /// Samples are taken in stored order; indices do not enter the sum.
    pub fn analyze(&self, signal: &Signal) -> Result<SpectrumAnalysis> {
        self.analyze_samples(signal.samples())
    }

    pub fn analyze_samples(&self, samples: &[f64]) -> Result<SpectrumAnalysis> {
        let spectrum = forward(samples)?;
        Ok(SpectrumAnalysis::new(
            &spectrum,
            self.config.normalize_amplitude,
        ))
    }

    /// Inverse-transform a spectrum into a signal indexed `0..N`
    pub fn reconstruct(&self, spectrum: &Spectrum) -> Result<Signal> {
        let signal = Signal::from_samples(inverse(spectrum)?);

        if self.config.round_reconstruction {
            Ok(algebra::round_samples(&signal))
        } else {
            Ok(signal)
        }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn update_config(&mut self, config: TransformConfig) {
        self.config = config;
    }
}
