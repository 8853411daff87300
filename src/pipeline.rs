//! Telemetry Pipeline
//!
//! The per-frame orchestrator: validate the frame, run the three
//! detectors independently, classify, and hand the result back for the
//! caller to persist. `process` is a pure function of (frame,
//! snapshot); persistence happens after detection and can never alter
//! an already-computed result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::channels::ChannelVector;
use crate::config::ConfigSnapshot;
use crate::detectors::{check_authenticity, check_position, score};
use crate::error::DetectionError;
use crate::events::{LogEntry, LogSink};
use crate::frame::TelemetryFrame;
use crate::store::ThreatStore;
use crate::threat::{classify, Threat};

/// Frame-processed summary, echoed back for the caller to persist
/// alongside the raw telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub vehicle_id: String,
    pub snapshot_revision: u64,
    pub processed_at: DateTime<Utc>,
    pub threats_detected: usize,
}

/// Result of processing one telemetry frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub processed: bool,
    pub threats_detected: usize,
    pub threats: Vec<Threat>,
    pub summary: FrameSummary,
}

/// Process one frame against a configuration snapshot.
///
/// The detectors are independent - no shared mutable state within one
/// call, so their order does not affect the outcome. A malformed frame
/// is rejected with `InvalidFrame` before any detector runs and
/// produces no threat.
pub fn process(
    frame: &TelemetryFrame,
    snapshot: &ConfigSnapshot,
) -> Result<PipelineResult, DetectionError> {
    frame.validate()?;

    let reading = ChannelVector::from_sensors(&frame.sensors);
    let anomaly = score(
        snapshot.baseline.as_deref(),
        snapshot.config.anomaly_threshold,
        &reading,
    )?;
    let position = check_position(&frame.gps);
    let authenticity = check_authenticity(&frame.control);

    let threats = classify(frame, &anomaly, &position, &authenticity);

    Ok(PipelineResult {
        processed: true,
        threats_detected: threats.len(),
        summary: FrameSummary {
            vehicle_id: frame.vehicle_id.clone(),
            snapshot_revision: snapshot.revision,
            processed_at: Utc::now(),
            threats_detected: threats.len(),
        },
        threats,
    })
}

/// Detection result plus any downstream persistence failures. The
/// failures are reported, never folded back into the detection.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub result: PipelineResult,
    pub persistence_errors: Vec<String>,
}

impl ProcessOutcome {
    pub fn fully_persisted(&self) -> bool {
        self.persistence_errors.is_empty()
    }
}

/// Process one frame, then append threats to the store and notable
/// events to the sink.
///
/// Detection completes before any persistence is attempted; a failing
/// store or sink leaves the detection result intact and is surfaced in
/// `persistence_errors`.
pub fn process_and_record(
    frame: &TelemetryFrame,
    snapshot: &ConfigSnapshot,
    store: &dyn ThreatStore,
    sink: &dyn LogSink,
) -> Result<ProcessOutcome, DetectionError> {
    let result = process(frame, snapshot)?;

    let mut persistence_errors = Vec::new();
    for threat in &result.threats {
        if let Err(e) = store.append(threat) {
            log::error!("Failed to persist threat {}: {}", threat.threat_id, e);
            persistence_errors.push(e.to_string());
        }
        if let Err(e) = sink.record(LogEntry::threat_raised(threat)) {
            log::error!("Failed to record threat event: {}", e);
            persistence_errors.push(e.to_string());
        }
    }

    Ok(ProcessOutcome { result, persistence_errors })
}
