//! Sinusoid synthesis for building test inputs
//!
//! One second of signal is produced: `N = sampling_freq` samples of
//! `A * sin(2π f n / Fs + φ)` (or cosine), indexed `0..N`.

use std::f64::consts::PI;

use super::Signal;
use crate::error::{Result, SignalError};

/// Waveform shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveShape {
    Sine,
    Cosine,
}

/// Sinusoid parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSpec {
    pub shape: WaveShape,

    /// Peak amplitude A
    pub amplitude: f64,

    /// Analog frequency f in Hz
    pub analog_freq: f64,

    /// Sampling frequency Fs in Hz (also the sample count)
    pub sampling_freq: f64,

    /// Phase shift φ in radians
    pub phase: f64,
}

impl WaveSpec {
    /// Synthesize the waveform
    ///
    /// # Errors
    /// `InvalidParameter` when `sampling_freq` is not a positive whole
    /// number or is below the Nyquist rate `2 * analog_freq`.
    pub fn generate(&self) -> Result<Signal> {
        if self.sampling_freq.is_nan()
            || self.sampling_freq < 1.0
            || self.sampling_freq.fract() != 0.0
        {
            return Err(SignalError::InvalidParameter {
                name: "sampling frequency",
                reason: format!("{} is not a positive whole number", self.sampling_freq),
            });
        }

        if self.sampling_freq < 2.0 * self.analog_freq {
            return Err(SignalError::InvalidParameter {
                name: "sampling frequency",
                reason: format!(
                    "{} Hz is below the Nyquist rate for {} Hz",
                    self.sampling_freq, self.analog_freq
                ),
            });
        }

        let num_samples = self.sampling_freq as usize;
        let omega = 2.0 * PI * self.analog_freq / self.sampling_freq;

        let samples = (0..num_samples)
            .map(|n| {
                let angle = omega * n as f64 + self.phase;
                match self.shape {
                    WaveShape::Sine => self.amplitude * angle.sin(),
                    WaveShape::Cosine => self.amplitude * angle.cos(),
                }
            })
            .collect();

        Ok(Signal::from_samples(samples))
    }
}

/// `A * sin(2π f n / Fs + φ)` for `n` in `0..Fs`
pub fn sine(amplitude: f64, analog_freq: f64, sampling_freq: f64, phase: f64) -> Result<Signal> {
    WaveSpec {
        shape: WaveShape::Sine,
        amplitude,
        analog_freq,
        sampling_freq,
        phase,
    }
    .generate()
}

/// `A * cos(2π f n / Fs + φ)` for `n` in `0..Fs`
pub fn cosine(amplitude: f64, analog_freq: f64, sampling_freq: f64, phase: f64) -> Result<Signal> {
    WaveSpec {
        shape: WaveShape::Cosine,
        amplitude,
        analog_freq,
        sampling_freq,
        phase,
    }
    .generate()
}
