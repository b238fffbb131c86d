//! Error types shared by the codec, the transform and the signal operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Malformed signal file at line {line_number} ({line:?}): {reason}")]
    Format {
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("{operation} requires at least one sample")]
    EmptyInput { operation: &'static str },

    #[error("Frequency index {index} is out of range for a spectrum of {len} bins")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Signals have different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("No {0} loaded")]
    NothingLoaded(&'static str),
}

impl SignalError {
    pub(crate) fn format(line_number: usize, line: &str, reason: impl Into<String>) -> Self {
        SignalError::Format {
            line_number,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SignalError>;
