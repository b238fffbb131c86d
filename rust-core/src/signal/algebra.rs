//! Elementary per-sample operations on time-domain signals
//!
//! Binary operations align their operands on the union of both index
//! sets, except [`multiply`] which pairs samples by position.

use std::collections::BTreeMap;

use super::Signal;
use crate::error::{Result, SignalError};

/// Target range for min-max normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeRange {
    /// Rescale to [0, 1]
    Unit,

    /// Rescale to [-1, 1]
    Symmetric,
}

/// Pointwise sum over the union of both index sets
pub fn add(a: &Signal, b: &Signal) -> Signal {
    aligned(a, b, |x, y| x + y)
}

/// Pointwise difference `a - b` over the union of both index sets
pub fn subtract(a: &Signal, b: &Signal) -> Signal {
    aligned(a, b, |x, y| x - y)
}

/// Position-by-position product of two equal-length signals
///
/// Samples are paired by storage position, not by index, and the result
/// carries `a`'s indices. This differs from [`add`]/[`subtract`] on purpose:
/// existing fixtures were produced this way.
pub fn multiply(a: &Signal, b: &Signal) -> Result<Signal> {
    if a.len() != b.len() {
        return Err(SignalError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let samples = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(&x, &y)| x * y)
        .collect();

    Ok(a.with_samples(samples))
}

/// Multiply every sample by `factor`
pub fn scale(signal: &Signal, factor: f64) -> Signal {
    signal.map_samples(|s| s * factor)
}

pub fn square(signal: &Signal) -> Signal {
    signal.map_samples(|s| s * s)
}

/// Running sum in stored order: `y[i] = x[0] + ... + x[i]`
pub fn accumulate(signal: &Signal) -> Signal {
    let samples = signal
        .samples()
        .iter()
        .scan(0.0, |total, &s| {
            *total += s;
            Some(*total)
        })
        .collect();

    signal.with_samples(samples)
}

/// Linear min-max rescale
///
/// A constant signal maps to all zeros in either range. An empty signal is
/// returned unchanged.
pub fn normalize(signal: &Signal, range: NormalizeRange) -> Signal {
    let Some((min, max)) = min_max(signal.samples()) else {
        return signal.clone();
    };

    if max == min {
        return signal.map_samples(|_| 0.0);
    }

    let span = max - min;
    match range {
        NormalizeRange::Unit => signal.map_samples(|s| (s - min) / span),
        NormalizeRange::Symmetric => signal.map_samples(|s| 2.0 * ((s - min) / span) - 1.0),
    }
}

/// Subtract the arithmetic mean from every sample
pub fn remove_dc(signal: &Signal) -> Result<Signal> {
    let mean = mean(signal.samples()).ok_or(SignalError::EmptyInput {
        operation: "DC removal",
    })?;

    Ok(signal.map_samples(|s| s - mean))
}

/// Round every sample to the nearest integer
///
/// Used after an inverse transform when the original signal is known to be
/// integer-valued.
pub fn round_samples(signal: &Signal) -> Signal {
    signal.map_samples(f64::round)
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Combine two signals over the sorted union of their indices
fn aligned(a: &Signal, b: &Signal, op: impl Fn(f64, f64) -> f64) -> Signal {
    let left = index_map(a);
    let right = index_map(b);

    let mut domain: Vec<i64> = left.keys().chain(right.keys()).copied().collect();
    domain.sort_unstable();
    domain.dedup();

    let samples = domain
        .iter()
        .map(|i| {
            let x = left.get(i).copied().unwrap_or(0.0);
            let y = right.get(i).copied().unwrap_or(0.0);
            op(x, y)
        })
        .collect();

    Signal {
        indices: domain,
        samples,
    }
}

/// First sample wins when an index repeats
fn index_map(signal: &Signal) -> BTreeMap<i64, f64> {
    let mut map = BTreeMap::new();
    for (index, sample) in signal.iter() {
        map.entry(index).or_insert(sample);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(indices: &[i64], samples: &[f64]) -> Signal {
        Signal::new(indices.to_vec(), samples.to_vec()).unwrap()
    }

    #[test]
    fn test_add_unions_index_sets() {
        let a = signal(&[0, 1, 2], &[1.0, 2.0, 3.0]);
        let b = signal(&[-1, 1, 3], &[10.0, 20.0, 30.0]);

        let sum = add(&a, &b);

        assert_eq!(sum.indices(), &[-1, 0, 1, 2, 3]);
        assert_eq!(sum.samples(), &[10.0, 1.0, 22.0, 3.0, 30.0]);
    }

    #[test]
    fn test_subtract_sorts_unordered_input() {
        let a = signal(&[2, 0], &[5.0, 1.0]);
        let b = signal(&[0, 1], &[1.0, 4.0]);

        let diff = subtract(&a, &b);

        assert_eq!(diff.indices(), &[0, 1, 2]);
        assert_eq!(diff.samples(), &[0.0, -4.0, 5.0]);
    }

    #[test]
    fn test_multiply_ignores_indices() {
        let a = signal(&[0, 1, 2], &[1.0, 2.0, 3.0]);
        let b = signal(&[5, 6, 7], &[2.0, 2.0, 2.0]);

        let product = multiply(&a, &b).unwrap();

        assert_eq!(product.indices(), &[0, 1, 2]);
        assert_eq!(product.samples(), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_multiply_rejects_different_lengths() {
        let a = signal(&[0, 1, 2], &[1.0, 2.0, 3.0]);
        let b = signal(&[0, 1], &[1.0, 2.0]);

        assert_eq!(
            multiply(&a, &b).unwrap_err(),
            SignalError::LengthMismatch { left: 3, right: 2 }
        );
    }

    #[test]
    fn test_scale_and_square() {
        let a = signal(&[0, 1, 2], &[-1.0, 0.5, 3.0]);

        assert_eq!(scale(&a, -2.0).samples(), &[2.0, -1.0, -6.0]);
        assert_eq!(square(&a).samples(), &[1.0, 0.25, 9.0]);
    }

    #[test]
    fn test_accumulate_follows_stored_order() {
        let a = signal(&[2, 0, 1], &[1.0, 2.0, 3.0]);

        let acc = accumulate(&a);

        assert_eq!(acc.indices(), &[2, 0, 1]);
        assert_eq!(acc.samples(), &[1.0, 3.0, 6.0]);
    }

    #[test]
    fn test_normalize_ranges() {
        let a = signal(&[0, 1, 2], &[2.0, 4.0, 6.0]);

        let unit = normalize(&a, NormalizeRange::Unit);
        assert_eq!(unit.samples(), &[0.0, 0.5, 1.0]);

        let symmetric = normalize(&a, NormalizeRange::Symmetric);
        assert_eq!(symmetric.samples(), &[-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_normalize_constant_signal_is_zero() {
        let a = signal(&[0, 1, 2], &[7.0, 7.0, 7.0]);

        assert_eq!(normalize(&a, NormalizeRange::Unit).samples(), &[0.0; 3]);
        assert_eq!(normalize(&a, NormalizeRange::Symmetric).samples(), &[0.0; 3]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let a = signal(&[0, 1, 2, 3, 4], &[3.7, -1.2, 8.9, 0.0, 2.5]);

        let once = normalize(&a, NormalizeRange::Unit);
        let twice = normalize(&once, NormalizeRange::Unit);

        for (x, y) in once.samples().iter().zip(twice.samples()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_remove_dc_zero_mean() {
        let a = signal(&[0, 1, 2, 3], &[1.0, 2.0, 3.0, 6.0]);

        let centered = remove_dc(&a).unwrap();

        assert_eq!(centered.samples(), &[-2.0, -1.0, 0.0, 3.0]);
        assert!(remove_dc(&Signal::default()).is_err());
    }

    #[test]
    fn test_round_samples() {
        let a = signal(&[0, 1, 2], &[0.9999999, 2.0000001, -2.6]);
        assert_eq!(round_samples(&a).samples(), &[1.0, 2.0, -3.0]);
    }
}
