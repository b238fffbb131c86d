//! Signal Lab - Discrete Fourier Transform Core
//!
//! Direct-summation DFT/IDFT, spectrum editing, per-sample signal algebra
//! and the line-oriented signal file format.

pub mod codec;
pub mod compare;
pub mod error;
pub mod signal;
pub mod spectrum;
pub mod workbench;

pub use codec::{DomainKind, Payload, SignalFile};
pub use error::{Result, SignalError};
pub use signal::Signal;
pub use spectrum::{DftEngine, Spectrum, SpectrumAnalysis, TransformConfig};
pub use workbench::{DcRemoval, Workbench};
