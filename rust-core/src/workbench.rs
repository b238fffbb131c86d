//! Session workflow around the transform core
//!
//! Holds the current time-domain signal and the current spectrum between
//! calls: load or generate a signal, transform it, edit the spectrum, then
//! reconstruct or save. The functions it calls stay stateless.

use std::collections::BTreeSet;

use crate::codec::{self, DomainKind, Payload};
use crate::error::{Result, SignalError};
use crate::signal::Signal;
use crate::spectrum::{ops, AmplitudeScale, DftEngine, SpectrumAnalysis, TransformConfig};

/// DC removal variant to apply to the current spectrum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcRemoval {
    /// `X[0] = 0`
    ZeroBin,

    /// `X[k] -= mean(X)`
    SubtractMean,
}

#[derive(Debug, Clone, Default)]
pub struct Workbench {
    engine: DftEngine,
    signal: Option<Signal>,
    analysis: Option<SpectrumAnalysis>,
}

impl Workbench {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            engine: DftEngine::new(config),
            signal: None,
            analysis: None,
        }
    }

    pub fn config(&self) -> &TransformConfig {
        self.engine.config()
    }

    pub fn update_config(&mut self, config: TransformConfig) {
        self.engine.update_config(config);
    }

    pub fn signal(&self) -> Option<&Signal> {
        self.signal.as_ref()
    }

    pub fn analysis(&self) -> Option<&SpectrumAnalysis> {
        self.analysis.as_ref()
    }

    /// Load file contents into the session
    ///
    /// A time-domain file replaces the current signal, a spectrum file
    /// replaces the current spectrum.
    pub fn load(&mut self, text: &str) -> Result<DomainKind> {
        let file = codec::parse(text)?;
        let domain = file.domain();

        match file.payload {
            Payload::Time(signal) => {
                tracing::info!(samples = signal.len(), "loaded time-domain signal");
                self.signal = Some(signal);
            }
            Payload::Frequency(spectrum) => {
                tracing::info!(bins = spectrum.len(), "loaded amplitude/phase spectrum");
                self.analysis = Some(SpectrumAnalysis::new(
                    &spectrum,
                    self.config().normalize_amplitude,
                ));
            }
        }

        Ok(domain)
    }

    pub fn set_signal(&mut self, signal: Signal) {
        self.signal = Some(signal);
    }

    /// Forward-transform the current signal into the current spectrum
    pub fn transform(&mut self) -> Result<&SpectrumAnalysis> {
        let signal = self.signal.as_ref().ok_or(SignalError::NothingLoaded("signal"))?;
        let analysis = self.engine.analyze(signal)?;

        tracing::info!(bins = analysis.len(), peak = analysis.peak(), "computed spectrum");
        Ok(self.analysis.insert(analysis))
    }

    pub fn remove_dc(&mut self, variant: DcRemoval) -> Result<&SpectrumAnalysis> {
        let spectrum = self.current_analysis()?.to_spectrum();
        let cleaned = match variant {
            DcRemoval::ZeroBin => ops::remove_dc_bin(&spectrum),
            DcRemoval::SubtractMean => ops::remove_dc_mean(&spectrum),
        };

        tracing::info!(?variant, "removed DC component");
        let analysis = SpectrumAnalysis::new(&cleaned, self.config().normalize_amplitude);
        Ok(self.analysis.insert(analysis))
    }

    /// Edit bin `k` and its mirror
    ///
    /// The amplitude is read on the display scale: normalized when
    /// `normalize_amplitude` is set, true magnitude otherwise.
    pub fn modify(
        &mut self,
        k: usize,
        amplitude: Option<f64>,
        phase: Option<f64>,
    ) -> Result<&SpectrumAnalysis> {
        let scale = if self.config().normalize_amplitude {
            AmplitudeScale::Normalized
        } else {
            AmplitudeScale::Actual
        };

        let mut analysis = self.current_analysis()?.clone();
        if let Some(amplitude) = amplitude {
            analysis = analysis.with_amplitude(k, amplitude, scale)?;
        }
        if let Some(phase) = phase {
            analysis = analysis.with_phase(k, phase)?;
        }

        tracing::info!(k, ?amplitude, ?phase, "modified spectral component");
        Ok(self.analysis.insert(analysis))
    }

    pub fn dominant_frequencies(&self, threshold: f64) -> Result<BTreeSet<usize>> {
        Ok(self.current_analysis()?.dominant_frequencies(threshold))
    }

    /// Inverse-transform the current spectrum; the result becomes the
    /// current signal
    pub fn reconstruct(&mut self) -> Result<&Signal> {
        let spectrum = self.current_analysis()?.to_spectrum();
        let signal = self.engine.reconstruct(&spectrum)?;

        tracing::info!(samples = signal.len(), "reconstructed signal");
        Ok(self.signal.insert(signal))
    }

    /// Current spectrum in the file format, true magnitudes
    pub fn save_spectrum(&self) -> Result<String> {
        Ok(self.current_analysis()?.to_text())
    }

    pub fn save_signal(&self) -> Result<String> {
        let signal = self.signal.as_ref().ok_or(SignalError::NothingLoaded("signal"))?;
        Ok(codec::serialize_signal(signal))
    }

    fn current_analysis(&self) -> Result<&SpectrumAnalysis> {
        self.analysis
            .as_ref()
            .ok_or(SignalError::NothingLoaded("spectrum"))
    }
}
