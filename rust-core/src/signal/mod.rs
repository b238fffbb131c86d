//! Time-domain signals and the per-sample operations applied to them

pub mod algebra;
pub mod generate;

pub use algebra::NormalizeRange;
pub use generate::WaveShape;

use crate::error::{Result, SignalError};

/// Discrete-time signal: samples paired positionally with integer indices
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signal {
    indices: Vec<i64>,
    samples: Vec<f64>,
}

impl Signal {
    /// Create a signal from index/sample pairs
    ///
    /// Indices are kept in the given order; see [`Signal::sorted`] to
    /// restore ascending order before serialization.
    pub fn new(indices: Vec<i64>, samples: Vec<f64>) -> Result<Self> {
        if indices.len() != samples.len() {
            return Err(SignalError::LengthMismatch {
                left: indices.len(),
                right: samples.len(),
            });
        }

        Ok(Self { indices, samples })
    }

    /// Create a signal indexed `0..N`
    pub fn from_samples(samples: Vec<f64>) -> Self {
        let indices = (0..samples.len() as i64).collect();
        Self { indices, samples }
    }

    pub fn indices(&self) -> &[i64] {
        &self.indices
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over `(index, sample)` pairs in stored order
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.indices.iter().copied().zip(self.samples.iter().copied())
    }

    /// Look up the sample stored at `index`
    pub fn sample_at(&self, index: i64) -> Option<f64> {
        self.indices
            .iter()
            .position(|&i| i == index)
            .map(|pos| self.samples[pos])
    }

    /// True when indices are strictly increasing (hence unique)
    pub fn is_ordered(&self) -> bool {
        self.indices.windows(2).all(|w| w[0] < w[1])
    }

    /// Copy of this signal with pairs sorted by ascending index
    pub fn sorted(&self) -> Self {
        let mut pairs: Vec<(i64, f64)> = self.iter().collect();
        pairs.sort_by_key(|&(index, _)| index);

        let (indices, samples) = pairs.into_iter().unzip();
        Self { indices, samples }
    }

    /// Copy of this signal with every sample passed through `f`
    pub(crate) fn map_samples(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            indices: self.indices.clone(),
            samples: self.samples.iter().map(|&s| f(s)).collect(),
        }
    }

    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> Self {
        debug_assert_eq!(samples.len(), self.indices.len());
        Self {
            indices: self.indices.clone(),
            samples,
        }
    }

    /// Split into owned index and sample vectors
    pub fn into_parts(self) -> (Vec<i64>, Vec<f64>) {
        (self.indices, self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = Signal::new(vec![0, 1, 2], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, SignalError::LengthMismatch { left: 3, right: 2 });
    }

    #[test]
    fn test_from_samples_indexes_from_zero() {
        let signal = Signal::from_samples(vec![4.0, 5.0, 6.0]);
        assert_eq!(signal.indices(), &[0, 1, 2]);
        assert_eq!(signal.sample_at(2), Some(6.0));
        assert_eq!(signal.sample_at(3), None);
    }

    #[test]
    fn test_sorted_restores_order() {
        let signal = Signal::new(vec![3, -1, 2], vec![30.0, -10.0, 20.0]).unwrap();
        assert!(!signal.is_ordered());

        let sorted = signal.sorted();
        assert!(sorted.is_ordered());
        assert_eq!(sorted.indices(), &[-1, 2, 3]);
        assert_eq!(sorted.samples(), &[-10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_duplicate_indices_are_not_ordered() {
        let signal = Signal::new(vec![0, 1, 1], vec![0.0; 3]).unwrap();
        assert!(!signal.is_ordered());
    }
}
