//! Threat Store
//!
//! Append-only store seam for classified threats. The pipeline calls
//! it but does not define its persistence; `InMemoryThreatStore` is
//! the bundled implementation for tests, the demo, and callers that
//! persist elsewhere.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::threat::{Threat, ThreatKind};

// ============================================================================
// STORE SEAM
// ============================================================================

/// Error from a downstream threat store. Store failures are reported
/// to the caller but never alter a detection result.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "threat store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Outcome of a resolve request. Resolution is idempotent: resolving a
/// threat twice is a reported no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveOutcome {
    Resolved,
    AlreadyResolved,
    NotFound,
}

/// Aggregate threat counts (the metrics surface).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatStats {
    pub total: usize,
    pub resolved: usize,
    pub active: usize,
    pub gps_spoofing: usize,
    pub control_hijacking: usize,
    pub data_tampering: usize,
    pub anomalies: usize,
}

/// Append-only threat persistence.
pub trait ThreatStore: Send + Sync {
    fn append(&self, threat: &Threat) -> Result<(), StoreError>;

    /// DETECTED -> RESOLVED transition for one threat.
    fn resolve(&self, threat_id: Uuid) -> Result<ResolveOutcome, StoreError>;

    /// Resolve every active threat (system recovery). Returns how many
    /// transitioned.
    fn resolve_all(&self) -> Result<usize, StoreError>;

    /// Newest-first threats, optionally filtered by resolved state.
    fn recent(&self, limit: usize, resolved: Option<bool>) -> Result<Vec<Threat>, StoreError>;

    fn stats(&self) -> Result<ThreatStats, StoreError>;
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Default)]
pub struct InMemoryThreatStore {
    threats: RwLock<HashMap<Uuid, Threat>>,
}

impl InMemoryThreatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.threats.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.threats.read().is_empty()
    }

    pub fn get(&self, threat_id: Uuid) -> Option<Threat> {
        self.threats.read().get(&threat_id).cloned()
    }

    /// Active threats detected at or after `since`.
    pub fn active_since(&self, since: DateTime<Utc>) -> usize {
        self.threats
            .read()
            .values()
            .filter(|t| !t.resolved && t.detected_at >= since)
            .count()
    }
}

impl ThreatStore for InMemoryThreatStore {
    fn append(&self, threat: &Threat) -> Result<(), StoreError> {
        self.threats.write().insert(threat.threat_id, threat.clone());
        Ok(())
    }

    fn resolve(&self, threat_id: Uuid) -> Result<ResolveOutcome, StoreError> {
        let mut threats = self.threats.write();
        match threats.get_mut(&threat_id) {
            None => Ok(ResolveOutcome::NotFound),
            Some(threat) => {
                if threat.mark_resolved() {
                    log::info!("Threat resolved: {}", threat_id);
                    Ok(ResolveOutcome::Resolved)
                } else {
                    Ok(ResolveOutcome::AlreadyResolved)
                }
            }
        }
    }

    fn resolve_all(&self) -> Result<usize, StoreError> {
        let mut threats = self.threats.write();
        let mut count = 0;
        for threat in threats.values_mut() {
            if threat.mark_resolved() {
                count += 1;
            }
        }
        if count > 0 {
            log::info!("System recovery resolved {} threats", count);
        }
        Ok(count)
    }

    fn recent(&self, limit: usize, resolved: Option<bool>) -> Result<Vec<Threat>, StoreError> {
        let threats = self.threats.read();
        let mut list: Vec<Threat> = threats
            .values()
            .filter(|t| resolved.map_or(true, |r| t.resolved == r))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.detected_at.cmp(&a.detected_at));
        list.truncate(limit);
        Ok(list)
    }

    fn stats(&self) -> Result<ThreatStats, StoreError> {
        let threats = self.threats.read();
        let mut stats = ThreatStats { total: threats.len(), ..Default::default() };
        for threat in threats.values() {
            if threat.resolved {
                stats.resolved += 1;
            }
            match threat.kind {
                ThreatKind::GpsSpoofing => stats.gps_spoofing += 1,
                ThreatKind::ControlHijacking => stats.control_hijacking += 1,
                ThreatKind::DataTampering => stats.data_tampering += 1,
                ThreatKind::AnomalyDetected => stats.anomalies += 1,
            }
        }
        stats.active = stats.total - stats.resolved;
        Ok(stats)
    }
}
