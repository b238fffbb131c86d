//! Operations on computed spectra
//!
//! Every function returns a new spectrum; inputs are never modified.

use num_complex::Complex64;
use std::collections::BTreeSet;

use super::{polar, Spectrum};
use crate::error::{Result, SignalError};

/// Threshold used for dominant frequencies when the caller has no preference
pub const DEFAULT_DOMINANT_THRESHOLD: f64 = 0.5;

/// Guard against division by zero on a flat spectrum
pub const DOMINANT_EPSILON: f64 = 1e-12;

/// Zero the DC bin: `X[0] = 0`
pub fn remove_dc_bin(spectrum: &Spectrum) -> Spectrum {
    let mut bins = spectrum.bins().to_vec();
    if let Some(dc) = bins.first_mut() {
        *dc = Complex64::new(0.0, 0.0);
    }
    Spectrum::new(bins)
}

/// Subtract the mean of all bins from every bin: `X'[k] = X[k] - mean(X)`
///
/// Numerically different from [`remove_dc_bin`]; both variants appear in
/// reference outputs.
pub fn remove_dc_mean(spectrum: &Spectrum) -> Spectrum {
    let bins = spectrum.bins();
    if bins.is_empty() {
        return spectrum.clone();
    }

    let mean = bins.iter().sum::<Complex64>() / bins.len() as f64;
    Spectrum::new(bins.iter().map(|&bin| bin - mean).collect())
}

/// Replace the amplitude and/or phase of bin `k`
///
/// Attributes left as `None` keep bin `k`'s current value. The mirror bin
/// `(N - k) mod N` receives the same amplitude and the negated phase. When
/// it coincides with `k` (k = 0, or k = N/2 for even N) only that bin
/// changes, and it keeps the negated phase.
///
/// # Errors
/// `IndexOutOfRange` when `k >= N`.
pub fn modify_component(
    spectrum: &Spectrum,
    k: usize,
    amplitude: Option<f64>,
    phase: Option<f64>,
) -> Result<Spectrum> {
    let len = spectrum.len();
    if k >= len {
        return Err(SignalError::IndexOutOfRange { index: k, len });
    }

    let (current_amplitude, current_phase) = spectrum.bins()[k].to_polar();
    let a = amplitude.unwrap_or(current_amplitude);
    let p = phase.unwrap_or(current_phase);

    let mut bins = spectrum.bins().to_vec();
    let mirror = spectrum.mirror_index(k);

    // Mirror written last: a self-mirrored bin ends with the negated phase
    bins[k] = polar::from_polar(a, p);
    bins[mirror] = polar::from_polar(a, -p);

    tracing::debug!(k, mirror, amplitude = a, phase = p, "modified spectral component");

    Ok(Spectrum::new(bins))
}

/// Divide every amplitude by the largest one
///
/// An all-zero input is returned unchanged.
pub fn normalize_amplitudes(amplitudes: &[f64]) -> Vec<f64> {
    let peak = amplitudes.iter().copied().fold(0.0, f64::max);
    if peak > 0.0 {
        amplitudes.iter().map(|&a| a / peak).collect()
    } else {
        amplitudes.to_vec()
    }
}

/// `(a - min) / (max - min + ε)` for every amplitude
pub fn min_max_scaled(amplitudes: &[f64]) -> Vec<f64> {
    let Some((min, max)) = crate::signal::algebra::min_max(amplitudes) else {
        return Vec::new();
    };

    let span = max - min + DOMINANT_EPSILON;
    amplitudes.iter().map(|&a| (a - min) / span).collect()
}

/// Indices whose min-max scaled amplitude is strictly above `threshold`
pub fn dominant_frequencies(amplitudes: &[f64], threshold: f64) -> BTreeSet<usize> {
    min_max_scaled(amplitudes)
        .into_iter()
        .enumerate()
        .filter(|&(_, scaled)| scaled > threshold)
        .map(|(k, _)| k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::dft;

    fn ramp_spectrum() -> Spectrum {
        dft::forward(&[1.0, 2.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn test_remove_dc_bin() {
        let spectrum = ramp_spectrum();
        let cleaned = remove_dc_bin(&spectrum);

        assert_eq!(cleaned.bins()[0], Complex64::new(0.0, 0.0));
        assert_eq!(&cleaned.bins()[1..], &spectrum.bins()[1..]);

        // Zeroing DC removes the mean in the time domain
        let restored = dft::inverse(&cleaned).unwrap();
        let expected = [-1.5, -0.5, 0.5, 1.5];
        for (got, want) in restored.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_remove_dc_mean_differs_from_bin_variant() {
        let spectrum = ramp_spectrum();
        let by_mean = remove_dc_mean(&spectrum);
        let by_bin = remove_dc_bin(&spectrum);

        let total: Complex64 = by_mean.bins().iter().sum();
        assert!(total.norm() < 1e-9);
        assert_ne!(by_mean, by_bin);

        // mean(X) == x[0] for a DFT, so every bin shifts by the first sample
        assert!((by_mean.bins()[0].re - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_modify_component_mirrors_amplitude() {
        let spectrum = ramp_spectrum();
        let edited = modify_component(&spectrum, 1, Some(5.0), None).unwrap();

        assert!((edited.bins()[1].norm() - 5.0).abs() < 1e-12);
        assert!((edited.bins()[3].norm() - 5.0).abs() < 1e-12);
        assert!((edited.bins()[3] - edited.bins()[1].conj()).norm() < 1e-12);

        // Phase of bin 1 is kept
        let original_phase = spectrum.bins()[1].arg();
        assert!((edited.bins()[1].arg() - original_phase).abs() < 1e-12);
    }

    #[test]
    fn test_modify_dc_touches_one_bin() {
        let spectrum = ramp_spectrum();
        let edited = modify_component(&spectrum, 0, Some(5.0), None).unwrap();

        assert!((edited.bins()[0].norm() - 5.0).abs() < 1e-12);
        assert!(edited.bins()[0].arg().abs() < 1e-12);
        assert_eq!(&edited.bins()[1..], &spectrum.bins()[1..]);
    }

    #[test]
    fn test_self_mirror_phase_edit_is_negated() {
        let spectrum = ramp_spectrum();

        let dc = modify_component(&spectrum, 0, None, Some(0.5)).unwrap();
        assert!((dc.bins()[0].arg() + 0.5).abs() < 1e-12);
        assert!((dc.bins()[0].norm() - 10.0).abs() < 1e-12);
        assert_eq!(&dc.bins()[1..], &spectrum.bins()[1..]);

        let nyquist = modify_component(&spectrum, 2, None, Some(0.5)).unwrap();
        assert!((nyquist.bins()[2].arg() + 0.5).abs() < 1e-12);
        assert!((nyquist.bins()[2].norm() - 2.0).abs() < 1e-12);
        assert_eq!(nyquist.bins()[1], spectrum.bins()[1]);
        assert_eq!(nyquist.bins()[3], spectrum.bins()[3]);
    }

    #[test]
    fn test_modify_phase_negates_mirror() {
        let spectrum = dft::forward(&[0.5, 1.0, -2.0, 3.0, 0.0]).unwrap();
        let edited = modify_component(&spectrum, 2, None, Some(0.75)).unwrap();

        assert!((edited.bins()[2].arg() - 0.75).abs() < 1e-12);
        assert!((edited.bins()[3].arg() + 0.75).abs() < 1e-12);
        assert!((edited.bins()[3].norm() - spectrum.bins()[2].norm()).abs() < 1e-12);
    }

    #[test]
    fn test_modify_out_of_range() {
        let err = modify_component(&ramp_spectrum(), 4, Some(1.0), None).unwrap_err();
        assert_eq!(err, SignalError::IndexOutOfRange { index: 4, len: 4 });
    }

    #[test]
    fn test_normalize_amplitudes() {
        assert_eq!(normalize_amplitudes(&[2.0, 4.0, 1.0]), vec![0.5, 1.0, 0.25]);
        assert_eq!(normalize_amplitudes(&[0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_dominant_threshold_is_strict() {
        let amplitudes = [0.0, 0.5, 1.0, 0.5000001];
        let dominant = dominant_frequencies(&amplitudes, DEFAULT_DOMINANT_THRESHOLD);

        assert_eq!(dominant.into_iter().collect::<Vec<_>>(), vec![2, 3]);

        // A bin sitting exactly on the threshold is excluded
        let scaled = min_max_scaled(&amplitudes);
        let at_threshold = dominant_frequencies(&amplitudes, scaled[3]);
        assert!(!at_threshold.contains(&3));
        assert!(at_threshold.contains(&2));
    }

    #[test]
    fn test_flat_spectrum_has_no_dominant_bins() {
        assert!(dominant_frequencies(&[3.0; 8], DEFAULT_DOMINANT_THRESHOLD).is_empty());
        assert!(dominant_frequencies(&[], DEFAULT_DOMINANT_THRESHOLD).is_empty());
    }
}
