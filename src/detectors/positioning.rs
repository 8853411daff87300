//! Position Plausibility Check
//!
//! Rule-based heuristic over one GPS reading. The bounds are absolute
//! physical/statistical plausibility limits, not model-relative, so the
//! check is deterministic and side-effect-free.

use serde::Serialize;

use crate::constants::{MAX_ALTITUDE, MAX_SPEED, MIN_ALTITUDE, NULL_ISLAND_EPSILON};
use crate::frame::GpsReading;
use crate::threat::Severity;

/// Verdict of the positioning check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum PositionVerdict {
    Clear,
    Spoofed { reason: &'static str, severity: Severity },
}

impl PositionVerdict {
    pub fn is_spoofed(&self) -> bool {
        matches!(self, PositionVerdict::Spoofed { .. })
    }
}

/// Evaluate the plausibility rules against one GPS reading.
///
/// Rules run in a fixed priority order and short-circuit: the first
/// match is the verdict. Reordering is a behavior change, not a
/// refactor.
pub fn check_position(gps: &GpsReading) -> PositionVerdict {
    // Rule 1: impossible altitude.
    if gps.altitude < MIN_ALTITUDE || gps.altitude > MAX_ALTITUDE {
        return PositionVerdict::Spoofed {
            reason: "Impossible altitude detected",
            severity: Severity::Critical,
        };
    }

    // Rule 2: impossible speed.
    if gps.speed > MAX_SPEED || gps.speed < 0.0 {
        return PositionVerdict::Spoofed {
            reason: "Impossible speed detected",
            severity: Severity::Critical,
        };
    }

    // Rule 3: null-island signature.
    if gps.latitude.abs() < NULL_ISLAND_EPSILON && gps.longitude.abs() < NULL_ISLAND_EPSILON {
        return PositionVerdict::Spoofed {
            reason: "Suspicious null island coordinates",
            severity: Severity::High,
        };
    }

    PositionVerdict::Clear
}
