//! Tolerance-based comparison against reference outputs

use std::fmt;

use crate::signal::Signal;
use crate::spectrum::Spectrum;

/// Tolerance used by the reference test files
pub const FIXTURE_TOLERANCE: f64 = 1e-6;

/// Which column of a two-column record disagreed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Index,
    Sample,
    Amplitude,
    Phase,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Equal,
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
    ValueMismatch {
        column: Column,
        position: usize,
        expected: f64,
        actual: f64,
    },
}

impl Comparison {
    pub fn is_equal(&self) -> bool {
        matches!(self, Comparison::Equal)
    }

    fn and_then(self, next: impl FnOnce() -> Comparison) -> Comparison {
        match self {
            Comparison::Equal => next(),
            mismatch => mismatch,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Equal => write!(f, "signals match"),
            Comparison::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} rows, found {actual}")
            }
            Comparison::ValueMismatch {
                column,
                position,
                expected,
                actual,
            } => write!(
                f,
                "{column:?} mismatch at position {position}: expected {expected}, found {actual}"
            ),
        }
    }
}

/// Compare indices then samples of two time-domain signals
pub fn compare_signals(expected: &Signal, actual: &Signal, tolerance: f64) -> Comparison {
    let expected_indices: Vec<f64> = expected.indices().iter().map(|&i| i as f64).collect();
    let actual_indices: Vec<f64> = actual.indices().iter().map(|&i| i as f64).collect();

    compare_columns(
        [(
            Column::Index,
            expected_indices.as_slice(),
            actual_indices.as_slice(),
        )],
        tolerance,
    )
    .and_then(|| {
        compare_columns(
            [(Column::Sample, expected.samples(), actual.samples())],
            tolerance,
        )
    })
}

/// Compare amplitudes then phases of two spectra
pub fn compare_spectra(expected: &Spectrum, actual: &Spectrum, tolerance: f64) -> Comparison {
    compare_polar(
        &expected.amplitudes(),
        &expected.phases(),
        &actual.amplitudes(),
        &actual.phases(),
        tolerance,
    )
}

/// Compare explicit amplitude and phase arrays
pub fn compare_polar(
    expected_amplitudes: &[f64],
    expected_phases: &[f64],
    actual_amplitudes: &[f64],
    actual_phases: &[f64],
    tolerance: f64,
) -> Comparison {
    compare_columns(
        [
            (Column::Amplitude, expected_amplitudes, actual_amplitudes),
            (Column::Phase, expected_phases, actual_phases),
        ],
        tolerance,
    )
}

/// All lengths are checked before any value
fn compare_columns<const N: usize>(
    columns: [(Column, &[f64], &[f64]); N],
    tolerance: f64,
) -> Comparison {
    for (_, expected, actual) in &columns {
        if expected.len() != actual.len() {
            return Comparison::LengthMismatch {
                expected: expected.len(),
                actual: actual.len(),
            };
        }
    }

    for (column, expected, actual) in columns {
        let mismatch = expected
            .iter()
            .zip(actual)
            .position(|(&e, &a)| !within(e, a, tolerance));

        if let Some(position) = mismatch {
            return Comparison::ValueMismatch {
                column,
                position,
                expected: expected[position],
                actual: actual[position],
            };
        }
    }

    Comparison::Equal
}

/// False for NaN on either side
fn within(expected: f64, actual: f64, tolerance: f64) -> bool {
    (expected - actual).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::spectrum::dft;

    #[test]
    fn test_equal_within_tolerance() {
        let expected = Signal::from_samples(vec![1.0, 2.0, 3.0]);
        let actual = Signal::from_samples(vec![1.0000005, 2.0, 2.9999995]);

        assert!(compare_signals(&expected, &actual, FIXTURE_TOLERANCE).is_equal());
    }

    #[test]
    fn test_length_mismatch() {
        let expected = Signal::from_samples(vec![1.0, 2.0, 3.0]);
        let actual = Signal::from_samples(vec![1.0, 2.0]);

        assert_eq!(
            compare_signals(&expected, &actual, FIXTURE_TOLERANCE),
            Comparison::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_index_checked_before_samples() {
        let expected = Signal::new(vec![0, 1], vec![1.0, 2.0]).unwrap();
        let actual = Signal::new(vec![0, 2], vec![1.0, 5.0]).unwrap();

        let result = compare_signals(&expected, &actual, FIXTURE_TOLERANCE);
        assert!(matches!(
            result,
            Comparison::ValueMismatch {
                column: Column::Index,
                position: 1,
                ..
            }
        ));
        assert!(result.to_string().contains("position 1"));
    }

    #[test]
    fn test_nan_never_matches() {
        let expected = Signal::from_samples(vec![1.0]);
        let actual = Signal::from_samples(vec![f64::NAN]);

        assert!(!compare_signals(&expected, &actual, FIXTURE_TOLERANCE).is_equal());
    }

    #[test]
    fn test_dft_against_fixture_text() {
        let fixture = "1\n0\n4\n\
            10.00000000000000f 0.00000000000000f\n\
            2.82842712474619f 2.35619449019234f\n\
            2.00000000000000f -3.14159265358979f\n\
            2.82842712474619f -2.35619449019234f\n";
        let expected = codec::parse_spectrum(fixture).unwrap();
        let actual = dft::forward(&[1.0, 2.0, 3.0, 4.0]).unwrap();

        let result = compare_spectra(&expected, &actual, FIXTURE_TOLERANCE);
        assert!(result.is_equal(), "{result}");
    }

    #[test]
    fn test_phase_mismatch_reported() {
        let result = compare_polar(&[1.0, 1.0], &[0.0, 0.5], &[1.0, 1.0], &[0.0, -0.5], 1e-6);
        assert!(matches!(
            result,
            Comparison::ValueMismatch {
                column: Column::Phase,
                position: 1,
                ..
            }
        ));
    }
}
