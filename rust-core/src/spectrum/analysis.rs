//! Polar view of a computed spectrum, ready for display and editing
//!
//! Keeps the true magnitudes next to the peak-normalized ones. Amplitude
//! edits made on the normalized scale do not touch the true magnitudes, so
//! persisting an analysis always writes real amplitudes unless the caller
//! folds the edits back with [`SpectrumAnalysis::rescaled`].

use std::collections::BTreeSet;

use super::ops;
use super::{mirror_index, Spectrum};
use crate::codec;
use crate::error::{Result, SignalError};

/// Which amplitude array an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmplitudeScale {
    /// Peak-normalized [0, 1] amplitudes
    Normalized,

    /// True magnitudes |X[k]|
    Actual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumAnalysis {
    actual_amplitudes: Vec<f64>,
    normalized_amplitudes: Vec<f64>,
    phases: Vec<f64>,

    /// Largest true magnitude at the time of the transform
    peak: f64,

    /// Whether [`amplitudes`](Self::amplitudes) presents the normalized scale
    normalized_display: bool,
}

impl SpectrumAnalysis {
    pub fn new(spectrum: &Spectrum, normalized_display: bool) -> Self {
        let actual_amplitudes = spectrum.amplitudes();
        let peak = actual_amplitudes.iter().copied().fold(0.0, f64::max);
        let normalized_amplitudes = ops::normalize_amplitudes(&actual_amplitudes);

        Self {
            actual_amplitudes,
            normalized_amplitudes,
            phases: spectrum.phases(),
            peak,
            normalized_display,
        }
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Amplitudes on the display scale chosen at construction
    pub fn amplitudes(&self) -> &[f64] {
        if self.normalized_display {
            &self.normalized_amplitudes
        } else {
            &self.actual_amplitudes
        }
    }

    pub fn actual_amplitudes(&self) -> &[f64] {
        &self.actual_amplitudes
    }

    pub fn normalized_amplitudes(&self) -> &[f64] {
        &self.normalized_amplitudes
    }

    /// Phases in radians
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Set the amplitude of bin `k` and its mirror on the given scale
    ///
    /// Editing the actual scale also refreshes the normalized value.
    /// Editing the normalized scale leaves the actual magnitudes alone.
    pub fn with_amplitude(&self, k: usize, amplitude: f64, scale: AmplitudeScale) -> Result<Self> {
        let mirror = self.check_index(k)?;
        let mut next = self.clone();

        match scale {
            AmplitudeScale::Normalized => {
                next.normalized_amplitudes[k] = amplitude;
                next.normalized_amplitudes[mirror] = amplitude;
            }
            AmplitudeScale::Actual => {
                let normalized = if self.peak > 0.0 {
                    amplitude / self.peak
                } else {
                    amplitude
                };
                for bin in [k, mirror] {
                    next.actual_amplitudes[bin] = amplitude;
                    next.normalized_amplitudes[bin] = normalized;
                }
            }
        }

        Ok(next)
    }

    /// Set the phase of bin `k` (radians); the mirror bin gets the negation
    ///
    /// A self-mirrored bin (k = 0, or N/2 for even N) ends with `-phase`.
    pub fn with_phase(&self, k: usize, phase: f64) -> Result<Self> {
        let mirror = self.check_index(k)?;
        let mut next = self.clone();

        next.phases[k] = phase;
        next.phases[mirror] = -phase;

        Ok(next)
    }

    pub fn with_phase_degrees(&self, k: usize, degrees: f64) -> Result<Self> {
        self.with_phase(k, degrees.to_radians())
    }

    /// Fold normalized-scale edits back into the actual magnitudes
    pub fn rescaled(&self) -> Self {
        let mut next = self.clone();
        next.actual_amplitudes = self
            .normalized_amplitudes
            .iter()
            .map(|&a| a * self.peak)
            .collect();
        next
    }

    /// Bins whose display amplitude stands out, see [`ops::dominant_frequencies`]
    pub fn dominant_frequencies(&self, threshold: f64) -> BTreeSet<usize> {
        ops::dominant_frequencies(self.amplitudes(), threshold)
    }

    /// Complex spectrum from the actual amplitudes and phases
    pub fn to_spectrum(&self) -> Spectrum {
        let bins = self
            .actual_amplitudes
            .iter()
            .zip(&self.phases)
            .map(|(&a, &p)| super::polar::from_polar(a, p))
            .collect();
        Spectrum::new(bins)
    }

    /// Serialize actual amplitudes and phases in the signal file format
    pub fn to_text(&self) -> String {
        codec::serialize_polar(&self.actual_amplitudes, &self.phases)
    }

    fn check_index(&self, k: usize) -> Result<usize> {
        if k >= self.len() {
            return Err(SignalError::IndexOutOfRange {
                index: k,
                len: self.len(),
            });
        }
        Ok(mirror_index(k, self.len()))
    }
}
