//! Command Authenticity Check
//!
//! Verifies a control-command batch against its additive checksum and
//! the authorized-source allow-list. The checksum is a plausibility
//! gate, not cryptographic integrity; see DESIGN.md.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::constants::{AUTHORIZED_SOURCES, CHECKSUM_MODULUS};
use crate::frame::ControlBatch;
use crate::threat::Severity;

static AUTHORIZED: Lazy<HashSet<&'static str>> =
    Lazy::new(|| AUTHORIZED_SOURCES.iter().copied().collect());

/// Verdict of the authenticity check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum AuthenticityVerdict {
    Clear,
    Hijacked { reason: &'static str, severity: Severity },
}

impl AuthenticityVerdict {
    pub fn is_hijacked(&self) -> bool {
        matches!(self, AuthenticityVerdict::Hijacked { .. })
    }
}

/// Expected checksum for a command batch: sum of codes mod 256.
/// Wrapping sum plus `rem_euclid` keeps hostile inputs (huge or
/// negative codes) from panicking and always lands in 0..=255.
pub fn expected_checksum(commands: &[i64]) -> i64 {
    commands
        .iter()
        .fold(0i64, |acc, c| acc.wrapping_add(*c))
        .rem_euclid(CHECKSUM_MODULUS)
}

/// Evaluate the authenticity rules against one command batch.
///
/// Ordered, short-circuit: the integrity check takes priority over the
/// source check, so a batch failing both reports the checksum failure.
pub fn check_authenticity(control: &ControlBatch) -> AuthenticityVerdict {
    // Rule 1: command integrity.
    if control.checksum != expected_checksum(&control.commands) {
        return AuthenticityVerdict::Hijacked {
            reason: "Command integrity check failed",
            severity: Severity::Critical,
        };
    }

    // Rule 2: authorized source.
    if !AUTHORIZED.contains(control.source.as_str()) {
        return AuthenticityVerdict::Hijacked {
            reason: "Unauthorized command source",
            severity: Severity::High,
        };
    }

    AuthenticityVerdict::Clear
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(commands: Vec<i64>, source: &str, checksum: i64) -> ControlBatch {
        ControlBatch { commands, source: source.to_string(), checksum }
    }

    #[test]
    fn test_valid_batch_is_clear() {
        let b = batch(vec![10, 20, 30], "GROUND_CONTROL", 60);
        assert_eq!(check_authenticity(&b), AuthenticityVerdict::Clear);
    }

    #[test]
    fn test_checksum_wraps_mod_256() {
        assert_eq!(expected_checksum(&[200, 100]), 44);
        assert_eq!(expected_checksum(&[]), 0);
        let b = batch(vec![200, 100], "ONBOARD_AI", 44);
        assert_eq!(check_authenticity(&b), AuthenticityVerdict::Clear);
    }

    #[test]
    fn test_bad_checksum_is_critical_regardless_of_source() {
        let b = batch(vec![10, 20, 30], "GROUND_CONTROL", 59);
        assert_eq!(
            check_authenticity(&b),
            AuthenticityVerdict::Hijacked {
                reason: "Command integrity check failed",
                severity: Severity::Critical
            }
        );
    }

    #[test]
    fn test_unauthorized_source_is_high() {
        let b = batch(vec![10, 20, 30], "ROGUE", 60);
        assert_eq!(
            check_authenticity(&b),
            AuthenticityVerdict::Hijacked {
                reason: "Unauthorized command source",
                severity: Severity::High
            }
        );
    }

    #[test]
    fn test_integrity_takes_priority_over_source() {
        // Both rules violated: checksum failure wins.
        let b = batch(vec![10, 20, 30], "ROGUE", 59);
        match check_authenticity(&b) {
            AuthenticityVerdict::Hijacked { severity, reason } => {
                assert_eq!(severity, Severity::Critical);
                assert!(reason.contains("integrity"));
            }
            AuthenticityVerdict::Clear => panic!("must be flagged"),
        }
    }

    #[test]
    fn test_all_authorized_sources_accepted() {
        for source in AUTHORIZED_SOURCES {
            let b = batch(vec![1, 2, 3], source, 6);
            assert_eq!(check_authenticity(&b), AuthenticityVerdict::Clear, "source {}", source);
        }
    }

    #[test]
    fn test_negative_and_extreme_codes_do_not_panic() {
        let expected = expected_checksum(&[-10, i64::MAX, i64::MIN]);
        assert!((0..CHECKSUM_MODULUS).contains(&expected));
        let b = batch(vec![-10, i64::MAX, i64::MIN], "GROUND_CONTROL", expected);
        assert_eq!(check_authenticity(&b), AuthenticityVerdict::Clear);
    }
}
