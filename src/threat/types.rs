//! Threat Types
//!
//! Core types for classified threats. No logic beyond lifecycle
//! helpers - the classifier owns threat creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// SEVERITY
// ============================================================================

/// Ordered criticality tag, independent of confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// THREAT KIND
// ============================================================================

/// Closed set of threat categories the core can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatKind {
    AnomalyDetected,
    GpsSpoofing,
    ControlHijacking,
    /// Only produced by the simulation path; there is no live
    /// tampering detector.
    DataTampering,
}

impl ThreatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatKind::AnomalyDetected => "ANOMALY_DETECTED",
            ThreatKind::GpsSpoofing => "GPS_SPOOFING",
            ThreatKind::ControlHijacking => "CONTROL_HIJACKING",
            ThreatKind::DataTampering => "DATA_TAMPERING",
        }
    }
}

impl std::fmt::Display for ThreatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// THREAT
// ============================================================================

/// One classified threat record.
///
/// Created exactly once by the classifier when a detector fires.
/// Immutable except for the resolved flag and its timestamp, both set
/// only through [`Threat::mark_resolved`]. A resolved threat cannot be
/// re-opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub threat_id: Uuid,
    pub kind: ThreatKind,
    pub severity: Severity,
    /// Normalized certainty in [0, 1].
    pub confidence: f64,
    pub detected_at: DateTime<Utc>,
    pub vehicle_id: String,
    /// Kind-specific diagnostic payload: the triggering reason and the
    /// raw input values, enough to audit the decision.
    pub details: serde_json::Value,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Threat {
    pub fn new(
        kind: ThreatKind,
        severity: Severity,
        confidence: f64,
        vehicle_id: &str,
        details: serde_json::Value,
    ) -> Self {
        Self {
            threat_id: Uuid::new_v4(),
            kind,
            severity,
            confidence: confidence.clamp(0.0, 1.0),
            detected_at: Utc::now(),
            vehicle_id: vehicle_id.to_string(),
            details,
            resolved: false,
            resolved_at: None,
        }
    }

    /// DETECTED -> RESOLVED. Terminal, idempotent: the first call
    /// stamps `resolved_at`, later calls change nothing and report
    /// `false`.
    pub fn mark_resolved(&mut self) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        self.resolved_at = Some(Utc::now());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::Critical.rank(), 4);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(ThreatKind::GpsSpoofing.as_str(), "GPS_SPOOFING");
        assert_eq!(Severity::Critical.as_str(), "CRITICAL");
        let json = serde_json::to_string(&ThreatKind::AnomalyDetected).unwrap();
        assert_eq!(json, "\"ANOMALY_DETECTED\"");
    }

    #[test]
    fn test_confidence_clamped() {
        let t = Threat::new(
            ThreatKind::AnomalyDetected,
            Severity::Medium,
            1.7,
            "drone-001",
            serde_json::json!({}),
        );
        assert_eq!(t.confidence, 1.0);
    }

    #[test]
    fn test_resolve_is_terminal_and_idempotent() {
        let mut t = Threat::new(
            ThreatKind::GpsSpoofing,
            Severity::Critical,
            0.95,
            "drone-001",
            serde_json::json!({}),
        );
        assert!(!t.resolved);
        assert!(t.mark_resolved());
        assert!(t.resolved);
        let stamped = t.resolved_at;
        assert!(stamped.is_some());

        // Second resolve: no-op, timestamp untouched.
        assert!(!t.mark_resolved());
        assert_eq!(t.resolved_at, stamped);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Threat::new(ThreatKind::DataTampering, Severity::High, 0.9, "v", serde_json::json!({}));
        let b = Threat::new(ThreatKind::DataTampering, Severity::High, 0.9, "v", serde_json::json!({}));
        assert_ne!(a.threat_id, b.threat_id);
    }
}
