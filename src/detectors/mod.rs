//! Detectors
//!
//! The three per-frame detectors. Each is a pure function of its
//! inputs; none depends on another's output, so the pipeline may run
//! them in any order.
//!
//! - `anomaly`: z-score deviation against the baseline model
//! - `positioning`: physical plausibility of the GPS reading
//! - `authenticity`: integrity and provenance of the command batch

pub mod anomaly;
pub mod authenticity;
pub mod positioning;

pub use anomaly::{score, AnomalyResult, ScoreOrigin};
pub use authenticity::{check_authenticity, AuthenticityVerdict};
pub use positioning::{check_position, PositionVerdict};
