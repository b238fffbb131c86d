//! Canonical magnitude/phase decomposition
//!
//! Reference files were written after snapping near-zero magnitudes and
//! phases to exact values and folding the ±π branch cut onto -π. Every
//! polar view of a spectrum goes through here so comparisons are exact.

use num_complex::Complex64;
use std::f64::consts::PI;

/// Snap threshold for magnitudes and phases
pub const POLAR_TOLERANCE: f64 = 1e-12;

/// Magnitude below [`POLAR_TOLERANCE`] becomes exactly 0
pub fn clean_magnitude(magnitude: f64) -> f64 {
    if magnitude.abs() < POLAR_TOLERANCE {
        0.0
    } else {
        magnitude
    }
}

/// Phase near 0 becomes 0, phase near +π becomes -π
pub fn clean_phase(phase: f64) -> f64 {
    if phase.abs() < POLAR_TOLERANCE {
        0.0
    } else if (phase - PI).abs() < POLAR_TOLERANCE {
        -PI
    } else {
        phase
    }
}

/// Split a bin into cleaned `(magnitude, phase)`
pub fn canonical_polar(bin: Complex64) -> (f64, f64) {
    let (magnitude, phase) = bin.to_polar();
    (clean_magnitude(magnitude), clean_phase(phase))
}

/// Build a bin from magnitude and phase: `A * (cos P + i sin P)`
pub fn from_polar(magnitude: f64, phase: f64) -> Complex64 {
    Complex64::new(magnitude * phase.cos(), magnitude * phase.sin())
}
