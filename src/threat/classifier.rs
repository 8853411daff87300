//! Threat Classifier
//!
//! Turns the three detector outputs for one frame into zero or more
//! threat records. Only classification logic lives here - detector
//! math stays in `detectors`, data shapes in `types`.

use serde_json::json;

use super::types::{Severity, Threat, ThreatKind};
use crate::detectors::anomaly::AnomalyResult;
use crate::detectors::authenticity::AuthenticityVerdict;
use crate::detectors::positioning::PositionVerdict;
use crate::frame::TelemetryFrame;

/// Anomaly confidence at or above this maps to High severity instead
/// of Medium.
pub const ANOMALY_HIGH_CONFIDENCE: f64 = 0.8;

/// Fixed confidence for positioning threats: detector certainty is
/// treated as near-total once a hard rule fires.
pub const POSITIONING_CONFIDENCE: f64 = 0.95;

/// Fixed confidence for command-authenticity threats.
pub const AUTHENTICITY_CONFIDENCE: f64 = 0.98;

/// Classify one frame's detector outputs into threat records.
///
/// At most one threat per detector, all three independent - a single
/// frame can raise zero to three. The anomaly channel derives severity
/// from confidence (Medium/High only); the rule-based detectors carry
/// the fixed severity of the rule that fired. That asymmetry is
/// intentional: statistical detections are inherently less certain
/// than hard rule violations.
pub fn classify(
    frame: &TelemetryFrame,
    anomaly: &AnomalyResult,
    position: &PositionVerdict,
    authenticity: &AuthenticityVerdict,
) -> Vec<Threat> {
    let mut threats = Vec::new();

    if anomaly.is_anomaly {
        let severity = if anomaly.confidence < ANOMALY_HIGH_CONFIDENCE {
            Severity::Medium
        } else {
            Severity::High
        };
        threats.push(Threat::new(
            ThreatKind::AnomalyDetected,
            severity,
            anomaly.confidence,
            &frame.vehicle_id,
            json!({
                "z_scores": anomaly.z_scores,
                "threshold": anomaly.threshold,
            }),
        ));
    }

    if let PositionVerdict::Spoofed { reason, severity } = position {
        threats.push(Threat::new(
            ThreatKind::GpsSpoofing,
            *severity,
            POSITIONING_CONFIDENCE,
            &frame.vehicle_id,
            json!({
                "reason": reason,
                "gps_data": frame.gps,
            }),
        ));
    }

    if let AuthenticityVerdict::Hijacked { reason, severity } = authenticity {
        threats.push(Threat::new(
            ThreatKind::ControlHijacking,
            *severity,
            AUTHENTICITY_CONFIDENCE,
            &frame.vehicle_id,
            json!({
                "reason": reason,
                "control_data": frame.control,
            }),
        ));
    }

    for threat in &threats {
        log::warn!(
            "Threat {} on {}: {} severity {} confidence {:.2}",
            threat.threat_id,
            threat.vehicle_id,
            threat.kind,
            threat.severity,
            threat.confidence
        );
    }

    threats
}
