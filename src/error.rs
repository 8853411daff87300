//! Detection Errors
//!
//! Error kinds for the detection core. A missing baseline is NOT an
//! error (the scorer degrades to a benign default); these cover the
//! cases that must reject the input instead.

/// Errors raised by model building, scoring, and frame validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// Baseline corpus was empty. Raised at model-build time only.
    InsufficientData,
    /// Reading/model channel counts disagree.
    ShapeMismatch { expected: usize, actual: usize },
    /// Malformed telemetry frame, rejected before any detector runs.
    InvalidFrame(String),
}

impl std::fmt::Display for DetectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionError::InsufficientData => {
                write!(f, "baseline corpus is empty, at least one sample required")
            }
            DetectionError::ShapeMismatch { expected, actual } => {
                write!(f, "channel count mismatch: expected {}, got {}", expected, actual)
            }
            DetectionError::InvalidFrame(reason) => {
                write!(f, "invalid telemetry frame: {}", reason)
            }
        }
    }
}

impl std::error::Error for DetectionError {}
