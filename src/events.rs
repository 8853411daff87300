//! System Events & Log Sink
//!
//! Structured, append-only event log entries for notable detection
//! events. The core emits entries through the [`LogSink`] seam; a
//! caller-supplied sink persists them. `MemoryLogSink` is the bundled
//! in-memory implementation used by tests and the demo.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::config::DetectionConfig;
use crate::threat::Threat;

// ============================================================================
// LOG ENTRY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// One structured log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub log_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            log_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            level,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    // --- Notable-event constructors -------------------------------------

    pub fn threat_raised(threat: &Threat) -> Self {
        Self::new(
            LogLevel::Warning,
            format!("Threat detected: {} on {}", threat.kind, threat.vehicle_id),
        )
        .with_details(json!({
            "threat_id": threat.threat_id,
            "severity": threat.severity,
            "confidence": threat.confidence,
        }))
    }

    pub fn threat_resolved(threat_id: Uuid) -> Self {
        Self::new(LogLevel::Info, format!("Threat resolved: {}", threat_id))
    }

    pub fn simulation_started(kind: &str, threat_id: Uuid, vehicle_id: &str) -> Self {
        Self::new(LogLevel::Warning, format!("Attack simulation started: {}", kind))
            .with_details(json!({ "threat_id": threat_id, "vehicle_id": vehicle_id }))
    }

    pub fn config_updated(config: &DetectionConfig) -> Self {
        Self::new(LogLevel::Info, "Detection configuration updated").with_details(json!({
            "anomaly_threshold": config.anomaly_threshold,
            "sensitivity": config.sensitivity,
            "auto_response_enabled": config.auto_response_enabled,
        }))
    }

    pub fn baseline_installed(sample_count: usize) -> Self {
        Self::new(LogLevel::Info, "Baseline model installed")
            .with_details(json!({ "baseline_samples": sample_count }))
    }
}

// ============================================================================
// SINK SEAM
// ============================================================================

/// Error from a downstream log sink. Sink failures are reported to the
/// caller but never alter a detection result.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkError(pub String);

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "log sink error: {}", self.0)
    }
}

impl std::error::Error for SinkError {}

/// Append-only structured event log.
pub trait LogSink: Send + Sync {
    fn record(&self, entry: LogEntry) -> Result<(), SinkError>;
}

// ============================================================================
// IN-MEMORY SINK
// ============================================================================

const DEFAULT_CAPACITY: usize = 1000;

/// Bounded in-memory sink. When the log grows past capacity the oldest
/// half is dropped.
pub struct MemoryLogSink {
    entries: Mutex<Vec<LogEntry>>,
    capacity: usize,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Mutex::new(Vec::new()), capacity: capacity.max(2) }
    }

    /// Newest-first slice of recorded entries, optionally filtered by
    /// level.
    pub fn recent(&self, limit: usize, level: Option<LogLevel>) -> Vec<LogEntry> {
        let entries = self.entries.lock();
        entries
            .iter()
            .rev()
            .filter(|e| level.map_or(true, |l| e.level == l))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for MemoryLogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemoryLogSink {
    fn record(&self, entry: LogEntry) -> Result<(), SinkError> {
        let mut entries = self.entries.lock();
        entries.push(entry);
        if entries.len() > self.capacity {
            let drop = self.capacity / 2;
            entries.drain(0..drop);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_recent() {
        let sink = MemoryLogSink::new();
        sink.record(LogEntry::new(LogLevel::Info, "one")).unwrap();
        sink.record(LogEntry::new(LogLevel::Warning, "two")).unwrap();
        sink.record(LogEntry::new(LogLevel::Info, "three")).unwrap();

        let all = sink.recent(10, None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].message, "three"); // newest first

        let warnings = sink.recent(10, Some(LogLevel::Warning));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "two");
    }

    #[test]
    fn test_capacity_drops_oldest_half() {
        let sink = MemoryLogSink::with_capacity(10);
        for i in 0..11 {
            sink.record(LogEntry::new(LogLevel::Info, format!("m{}", i))).unwrap();
        }
        assert_eq!(sink.len(), 6);
        // Oldest entries went first.
        let oldest = sink.recent(10, None).pop().unwrap();
        assert_eq!(oldest.message, "m5");
    }

    #[test]
    fn test_threat_raised_entry_shape() {
        let threat = Threat::new(
            crate::threat::ThreatKind::GpsSpoofing,
            crate::threat::Severity::Critical,
            0.95,
            "drone-001",
            json!({"reason": "Impossible altitude detected"}),
        );
        let entry = LogEntry::threat_raised(&threat);
        assert_eq!(entry.level, LogLevel::Warning);
        assert!(entry.message.contains("GPS_SPOOFING"));
        assert_eq!(entry.details.unwrap()["severity"], "CRITICAL");
    }
}
