//! Attack Simulation
//!
//! Scenario catalog, synthetic-threat injection, and frame forgers for
//! exercising the pipeline end to end. Simulated threats carry a
//! `simulated: true` marker in their details so they are auditable as
//! drills, not live detections.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::frame::{ControlBatch, GpsReading, SensorReading, TelemetryFrame};
use crate::threat::{Severity, Threat, ThreatKind};

// ============================================================================
// SCENARIOS
// ============================================================================

/// A named attack scenario with its injection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackScenario {
    pub scenario_id: Uuid,
    pub name: String,
    pub description: String,
    pub kind: ThreatKind,
    pub parameters: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub is_custom: bool,
}

impl AttackScenario {
    fn builtin(name: &str, description: &str, kind: ThreatKind, parameters: serde_json::Value) -> Self {
        Self {
            scenario_id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            kind,
            parameters,
            created_at: Utc::now(),
            is_custom: false,
        }
    }
}

/// The stock scenario catalog.
pub fn builtin_scenarios() -> Vec<AttackScenario> {
    vec![
        AttackScenario::builtin(
            "GPS Spoofing Attack",
            "Simulates GPS coordinate manipulation",
            ThreatKind::GpsSpoofing,
            json!({"altitude": -1000, "speed": 500}),
        ),
        AttackScenario::builtin(
            "Control Hijacking",
            "Simulates unauthorized command injection",
            ThreatKind::ControlHijacking,
            json!({"source": "UNKNOWN_SOURCE", "invalid_checksum": true}),
        ),
        AttackScenario::builtin(
            "Data Tampering",
            "Simulates sensor data corruption",
            ThreatKind::DataTampering,
            json!({"sensor_corruption": true}),
        ),
    ]
}

// ============================================================================
// SYNTHETIC THREAT INJECTION
// ============================================================================

/// Inject a synthetic threat of the given kind, as if the detectors
/// had fired on `vehicle_id`. Severity/confidence pairs are fixed per
/// kind.
pub fn simulate_attack(kind: ThreatKind, vehicle_id: &str) -> Threat {
    let (severity, confidence, params) = match kind {
        ThreatKind::GpsSpoofing => (
            Severity::Critical,
            0.99,
            json!({"latitude": 0, "longitude": 0, "altitude": -1000, "speed": 500}),
        ),
        ThreatKind::ControlHijacking => (
            Severity::Critical,
            0.98,
            json!({"source": "UNKNOWN_SOURCE", "invalid_checksum": true}),
        ),
        ThreatKind::DataTampering => (
            Severity::High,
            0.92,
            json!({"sensor_corruption": true, "corrupted_values": [150, 500, -10, 25, 0.1]}),
        ),
        ThreatKind::AnomalyDetected => (
            Severity::Medium,
            0.85,
            json!({"deviation_injected": true}),
        ),
    };

    let threat = Threat::new(
        kind,
        severity,
        confidence,
        vehicle_id,
        json!({ "simulated": true, "attack_params": params }),
    );
    log::warn!("Attack simulation started: {} on {}", kind, vehicle_id);
    threat
}

// ============================================================================
// FRAME FORGERS
// ============================================================================

/// A plausible normal-operation frame around lower Manhattan.
pub fn normal_frame<R: Rng>(rng: &mut R, vehicle_id: &str) -> TelemetryFrame {
    let commands = vec![0x01, 0x02, 0x03, 0x04];
    let checksum = crate::detectors::authenticity::expected_checksum(&commands);
    TelemetryFrame {
        vehicle_id: vehicle_id.to_string(),
        gps: GpsReading {
            latitude: 40.7128 + (rng.gen::<f64>() - 0.5) * 0.001,
            longitude: -74.0060 + (rng.gen::<f64>() - 0.5) * 0.001,
            altitude: 100.0 + rng.gen::<f64>() * 50.0,
            speed: 15.0 + rng.gen::<f64>() * 5.0,
        },
        sensors: SensorReading {
            temperature: 50.0 + rng.gen::<f64>() * 2.0,
            pressure: 1013.0 + rng.gen::<f64>() * 2.0,
            humidity: 45.0 + rng.gen::<f64>() * 2.0,
            voltage: 12.5 + rng.gen::<f64>() * 0.1,
            current: 2.1 + rng.gen::<f64>() * 0.05,
        },
        control: ControlBatch { commands, source: "GROUND_CONTROL".to_string(), checksum },
    }
}

/// A normal frame with spoofed positioning injected.
pub fn spoofed_gps_frame<R: Rng>(rng: &mut R, vehicle_id: &str) -> TelemetryFrame {
    let mut frame = normal_frame(rng, vehicle_id);
    frame.gps = GpsReading { latitude: 0.0, longitude: 0.0, altitude: -1000.0, speed: 500.0 };
    frame
}

/// A normal frame with a forged command batch injected.
pub fn hijacked_control_frame<R: Rng>(rng: &mut R, vehicle_id: &str) -> TelemetryFrame {
    let mut frame = normal_frame(rng, vehicle_id);
    frame.control = ControlBatch {
        commands: vec![0xFF, 0xEE, 0xDD, 0xCC],
        source: "UNKNOWN_SOURCE".to_string(),
        checksum: 99, // deliberately wrong
    };
    frame
}

/// A normal frame with corrupted sensor values injected.
pub fn tampered_sensor_frame<R: Rng>(rng: &mut R, vehicle_id: &str) -> TelemetryFrame {
    let mut frame = normal_frame(rng, vehicle_id);
    frame.sensors = SensorReading {
        temperature: 150.0,
        pressure: 500.0,
        humidity: -10.0,
        voltage: 25.0,
        current: 0.1,
    };
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::BaselineModel;
    use crate::config::{ConfigHandle, DetectionConfig};
    use crate::corpus::generate_normal_corpus;
    use crate::pipeline::process;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn handle() -> ConfigHandle {
        let mut rng = StdRng::seed_from_u64(11);
        let corpus = generate_normal_corpus(&mut rng, 500);
        let handle = ConfigHandle::new(DetectionConfig::default());
        handle.install_baseline(BaselineModel::build(&corpus).unwrap());
        handle
    }

    #[test]
    fn test_builtin_catalog() {
        let scenarios = builtin_scenarios();
        assert_eq!(scenarios.len(), 3);
        assert!(scenarios.iter().all(|s| !s.is_custom));
        assert_eq!(scenarios[0].kind, ThreatKind::GpsSpoofing);
        assert_eq!(scenarios[1].parameters["source"], "UNKNOWN_SOURCE");
    }

    #[test]
    fn test_simulated_threat_pairings() {
        let gps = simulate_attack(ThreatKind::GpsSpoofing, "drone-001");
        assert_eq!(gps.severity, Severity::Critical);
        assert_eq!(gps.confidence, 0.99);
        assert_eq!(gps.details["simulated"], true);

        let hijack = simulate_attack(ThreatKind::ControlHijacking, "drone-001");
        assert_eq!((hijack.severity, hijack.confidence), (Severity::Critical, 0.98));

        let tamper = simulate_attack(ThreatKind::DataTampering, "drone-001");
        assert_eq!((tamper.severity, tamper.confidence), (Severity::High, 0.92));
        assert_eq!(tamper.kind, ThreatKind::DataTampering);
    }

    #[test]
    fn test_normal_frame_is_quiet() {
        let mut rng = StdRng::seed_from_u64(3);
        let handle = handle();
        for _ in 0..20 {
            let frame = normal_frame(&mut rng, "drone-001");
            let result = process(&frame, &handle.snapshot()).unwrap();
            assert_eq!(result.threats_detected, 0, "normal frame must stay quiet");
        }
    }

    #[test]
    fn test_spoofed_frame_trips_positioning() {
        let mut rng = StdRng::seed_from_u64(4);
        let frame = spoofed_gps_frame(&mut rng, "drone-001");
        let result = process(&frame, &handle().snapshot()).unwrap();
        assert!(result
            .threats
            .iter()
            .any(|t| t.kind == ThreatKind::GpsSpoofing && t.severity == Severity::Critical));
    }

    #[test]
    fn test_hijacked_frame_trips_authenticity() {
        let mut rng = StdRng::seed_from_u64(5);
        let frame = hijacked_control_frame(&mut rng, "drone-001");
        let result = process(&frame, &handle().snapshot()).unwrap();
        assert!(result
            .threats
            .iter()
            .any(|t| t.kind == ThreatKind::ControlHijacking && t.severity == Severity::Critical));
    }

    #[test]
    fn test_tampered_frame_trips_anomaly() {
        let mut rng = StdRng::seed_from_u64(6);
        let frame = tampered_sensor_frame(&mut rng, "drone-001");
        let result = process(&frame, &handle().snapshot()).unwrap();
        let anomaly = result
            .threats
            .iter()
            .find(|t| t.kind == ThreatKind::AnomalyDetected)
            .expect("corrupted sensors must trip the anomaly scorer");
        assert_eq!(anomaly.confidence, 1.0);
        assert_eq!(anomaly.severity, Severity::High);
    }
}
