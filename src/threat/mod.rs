//! Threat Module
//!
//! Threat records and the classification logic that creates them.
//!
//! ## Structure
//! - `types`: Severity, ThreatKind, Threat
//! - `classifier`: detector outputs -> Vec<Threat>

pub mod classifier;
pub mod types;

pub use classifier::{classify, ANOMALY_HIGH_CONFIDENCE, AUTHENTICITY_CONFIDENCE, POSITIONING_CONFIDENCE};
pub use types::{Severity, Threat, ThreatKind};
