//! Detection Configuration
//!
//! Runtime-tunable detection settings plus the snapshot handle the
//! pipeline reads from. Updates never mutate a live snapshot: the
//! handle swaps a whole new `Arc<ConfigSnapshot>` so a concurrent
//! `process` call observes either the old or the new configuration in
//! full, never a torn mix of old baseline with new threshold.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::baseline::BaselineModel;
use crate::constants::{
    DEFAULT_ANOMALY_THRESHOLD, DEFAULT_DATA_WINDOW_SIZE, DEFAULT_GPS_SPEED_THRESHOLD,
};

// ============================================================================
// SENSITIVITY
// ============================================================================

/// Detection sensitivity preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    Medium,
    High,
}

impl Sensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Low => "low",
            Sensitivity::Medium => "medium",
            Sensitivity::High => "high",
        }
    }
}

// ============================================================================
// DETECTION CONFIG
// ============================================================================

/// Tunable detection settings, supplied as an immutable snapshot per
/// pipeline call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Z-score threshold above which a reading is anomalous.
    pub anomaly_threshold: f64,
    pub gps_speed_threshold: f64,
    pub data_window_size: usize,
    pub sensitivity: Sensitivity,
    pub auto_response_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
            gps_speed_threshold: DEFAULT_GPS_SPEED_THRESHOLD,
            data_window_size: DEFAULT_DATA_WINDOW_SIZE,
            sensitivity: Sensitivity::Medium,
            auto_response_enabled: true,
            updated_at: Utc::now(),
        }
    }
}

impl DetectionConfig {
    /// Lower threshold, more alerts.
    pub fn high_sensitivity() -> Self {
        Self {
            anomaly_threshold: 2.0,
            sensitivity: Sensitivity::High,
            ..Default::default()
        }
    }

    /// Higher threshold, fewer alerts.
    pub fn low_sensitivity() -> Self {
        Self {
            anomaly_threshold: 3.0,
            sensitivity: Sensitivity::Low,
            ..Default::default()
        }
    }
}

// ============================================================================
// SNAPSHOT + HANDLE
// ============================================================================

/// One coherent view of configuration and baseline. Immutable; cheap to
/// clone by `Arc`.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    pub config: DetectionConfig,
    pub baseline: Option<Arc<BaselineModel>>,
    /// Monotonic revision, bumped on every swap.
    pub revision: u64,
}

impl ConfigSnapshot {
    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }
}

/// Shared handle over the current snapshot. Readers take an `Arc` and
/// keep using it for the whole call; writers replace the snapshot
/// wholesale.
pub struct ConfigHandle {
    inner: RwLock<Arc<ConfigSnapshot>>,
}

impl ConfigHandle {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            inner: RwLock::new(Arc::new(ConfigSnapshot {
                config,
                baseline: None,
                revision: 0,
            })),
        }
    }

    /// Current snapshot. The returned `Arc` stays coherent even if a
    /// swap happens while the caller is still using it.
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        self.inner.read().clone()
    }

    /// Replace the detection settings, keeping the installed baseline.
    pub fn update_config(&self, mut config: DetectionConfig) -> Arc<ConfigSnapshot> {
        config.updated_at = Utc::now();
        self.swap(|old| ConfigSnapshot {
            config,
            baseline: old.baseline.clone(),
            revision: old.revision + 1,
        })
    }

    /// Install a freshly built baseline model.
    pub fn install_baseline(&self, model: BaselineModel) -> Arc<ConfigSnapshot> {
        self.swap(|old| ConfigSnapshot {
            config: old.config.clone(),
            baseline: Some(Arc::new(model)),
            revision: old.revision + 1,
        })
    }

    /// Drop the baseline, returning the scorer to its degraded
    /// (never-anomalous) startup behavior.
    pub fn clear_baseline(&self) -> Arc<ConfigSnapshot> {
        self.swap(|old| ConfigSnapshot {
            config: old.config.clone(),
            baseline: None,
            revision: old.revision + 1,
        })
    }

    fn swap(&self, build: impl FnOnce(&ConfigSnapshot) -> ConfigSnapshot) -> Arc<ConfigSnapshot> {
        let mut guard = self.inner.write();
        let next = Arc::new(build(&guard));
        log::info!(
            "Detection config swapped to revision {} (threshold {}, baseline {})",
            next.revision,
            next.config.anomaly_threshold,
            if next.has_baseline() { "installed" } else { "absent" }
        );
        *guard = next.clone();
        next
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::ChannelVector;

    fn model() -> BaselineModel {
        let samples = vec![ChannelVector::from_values(vec![50.0, 1013.0, 45.0, 12.5, 2.1])];
        BaselineModel::build(&samples).unwrap()
    }

    #[test]
    fn test_snapshot_starts_without_baseline() {
        let handle = ConfigHandle::default();
        let snap = handle.snapshot();
        assert!(!snap.has_baseline());
        assert_eq!(snap.revision, 0);
        assert_eq!(snap.config.anomaly_threshold, DEFAULT_ANOMALY_THRESHOLD);
    }

    #[test]
    fn test_update_preserves_baseline_and_bumps_revision() {
        let handle = ConfigHandle::default();
        handle.install_baseline(model());
        let snap = handle.update_config(DetectionConfig::high_sensitivity());
        assert_eq!(snap.revision, 2);
        assert!(snap.has_baseline());
        assert_eq!(snap.config.sensitivity, Sensitivity::High);
    }

    #[test]
    fn test_old_snapshot_stays_coherent_after_swap() {
        let handle = ConfigHandle::default();
        let before = handle.snapshot();
        handle.install_baseline(model());
        handle.update_config(DetectionConfig::low_sensitivity());
        // The reader's view is untouched by later swaps.
        assert!(!before.has_baseline());
        assert_eq!(before.revision, 0);
        assert_eq!(handle.snapshot().revision, 2);
    }

    #[test]
    fn test_clear_baseline() {
        let handle = ConfigHandle::default();
        handle.install_baseline(model());
        assert!(handle.snapshot().has_baseline());
        handle.clear_baseline();
        assert!(!handle.snapshot().has_baseline());
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        use std::sync::Arc as StdArc;
        let handle = StdArc::new(ConfigHandle::default());

        let writer = {
            let handle = handle.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    handle.install_baseline(model());
                    handle.update_config(DetectionConfig::high_sensitivity());
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let snap = handle.snapshot();
                        // A high-sensitivity config always travels with
                        // its own threshold; a torn snapshot would break
                        // this pairing.
                        if snap.config.sensitivity == Sensitivity::High {
                            assert_eq!(snap.config.anomaly_threshold, 2.0);
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
    }
}
