//! Frequency-domain representation and the discrete Fourier transform

pub mod analysis;
pub mod dft;
pub mod ops;
pub mod polar;

pub use analysis::{AmplitudeScale, SpectrumAnalysis};
pub use dft::{DftEngine, TransformConfig};

use num_complex::Complex64;

use crate::error::{Result, SignalError};

/// N complex coefficients `X[0..N-1]` indexed by discrete frequency k
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    bins: Vec<Complex64>,
}

impl Spectrum {
    pub fn new(bins: Vec<Complex64>) -> Self {
        Self { bins }
    }

    /// Build a spectrum from amplitude and phase (radians) arrays
    pub fn from_polar(amplitudes: &[f64], phases: &[f64]) -> Result<Self> {
        if amplitudes.len() != phases.len() {
            return Err(SignalError::LengthMismatch {
                left: amplitudes.len(),
                right: phases.len(),
            });
        }

        let bins = amplitudes
            .iter()
            .zip(phases)
            .map(|(&a, &p)| polar::from_polar(a, p))
            .collect();

        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[Complex64] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Index of the conjugate partner of bin `k`: `(N - k) mod N`
    pub fn mirror_index(&self, k: usize) -> usize {
        mirror_index(k, self.bins.len())
    }

    /// |X[k]| after canonical cleanup
    pub fn amplitudes(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|&bin| polar::canonical_polar(bin).0)
            .collect()
    }

    /// arg X[k] in radians after canonical cleanup
    pub fn phases(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|&bin| polar::canonical_polar(bin).1)
            .collect()
    }

    /// Phases converted to degrees for display
    pub fn phases_degrees(&self) -> Vec<f64> {
        self.phases().into_iter().map(f64::to_degrees).collect()
    }

    pub fn into_bins(self) -> Vec<Complex64> {
        self.bins
    }
}

impl From<Vec<Complex64>> for Spectrum {
    fn from(bins: Vec<Complex64>) -> Self {
        Self::new(bins)
    }
}

/// `(len - k) mod len`; 0 for an empty spectrum
pub fn mirror_index(k: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (len - k % len) % len
    }
}
