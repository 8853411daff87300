//! AV Defense Core - Fleet Telemetry Detection Engine
//!
//! Real-time intrusion detection for autonomous-vehicle telemetry.
//! Each frame runs through three independent detectors (statistical
//! anomaly scoring, positioning plausibility, command authenticity)
//! and comes back as zero or more confidence-scored, severity-ranked
//! threat records.
//!
//! ## Structure
//! - `channels` / `frame`: sensor layout and telemetry input shapes
//! - `baseline` / `corpus`: normal-behavior model and its sample source
//! - `config`: detection settings behind an atomic snapshot handle
//! - `detectors`: the three per-frame detectors
//! - `threat`: threat records and the classifier
//! - `pipeline`: frame orchestration
//! - `store` / `events`: persistence seams (threat store, log sink)
//! - `simulation`: attack drills and frame forgers
//!
//! ## Usage
//! ```
//! use av_defense_core::baseline::BaselineModel;
//! use av_defense_core::config::{ConfigHandle, DetectionConfig};
//! use av_defense_core::corpus::generate_normal_corpus;
//! use av_defense_core::pipeline::process;
//! use av_defense_core::simulation::normal_frame;
//!
//! let mut rng = rand::thread_rng();
//! let handle = ConfigHandle::new(DetectionConfig::default());
//! let model = BaselineModel::build(&generate_normal_corpus(&mut rng, 1000)).unwrap();
//! handle.install_baseline(model);
//!
//! let frame = normal_frame(&mut rng, "drone-001");
//! let result = process(&frame, &handle.snapshot()).unwrap();
//! assert!(result.processed);
//! ```

pub mod baseline;
pub mod channels;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod detectors;
pub mod error;
pub mod events;
pub mod frame;
pub mod pipeline;
pub mod simulation;
pub mod store;
pub mod threat;

// Re-export the main surface for convenience
pub use baseline::BaselineModel;
pub use config::{ConfigHandle, ConfigSnapshot, DetectionConfig, Sensitivity};
pub use detectors::{AnomalyResult, AuthenticityVerdict, PositionVerdict, ScoreOrigin};
pub use error::DetectionError;
pub use frame::{ControlBatch, GpsReading, SensorReading, TelemetryFrame};
pub use pipeline::{process, process_and_record, PipelineResult, ProcessOutcome};
pub use store::{InMemoryThreatStore, ResolveOutcome, ThreatStats, ThreatStore};
pub use threat::{Severity, Threat, ThreatKind};
