//! Central Detection Constants
//!
//! Single source of truth for detection defaults and plausibility
//! bounds. Runtime-tunable values (threshold, sensitivity) live in
//! [`crate::config::DetectionConfig`]; everything here is fixed by the
//! detection rules themselves.

/// Default anomaly threshold in standard deviations (z-score units).
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.5;

/// Default GPS speed threshold used by configuration snapshots.
pub const DEFAULT_GPS_SPEED_THRESHOLD: f64 = 50.0;

/// Default rolling data window size carried in configuration.
pub const DEFAULT_DATA_WINDOW_SIZE: usize = 50;

/// Floor applied to per-channel standard deviations so a constant
/// channel in the corpus cannot divide by zero at score time.
pub const STD_FLOOR: f64 = 1e-10;

// ============================================================================
// POSITIONING PLAUSIBILITY BOUNDS
// ============================================================================

/// Altitude below this (meters) is physically impossible.
pub const MIN_ALTITUDE: f64 = -500.0;

/// Altitude above this (meters) is physically impossible.
pub const MAX_ALTITUDE: f64 = 50_000.0;

/// Speed above this is physically impossible for fleet vehicles.
pub const MAX_SPEED: f64 = 500.0;

/// Coordinates inside this box around (0, 0) are treated as a
/// null-island spoofing signature.
pub const NULL_ISLAND_EPSILON: f64 = 0.1;

// ============================================================================
// COMMAND AUTHENTICITY
// ============================================================================

/// Modulus for the additive command checksum.
pub const CHECKSUM_MODULUS: i64 = 256;

/// Command sources permitted to issue control batches. Order is not
/// significant; membership is.
pub const AUTHORIZED_SOURCES: &[&str] = &["GROUND_CONTROL", "ONBOARD_AI", "EMERGENCY_OVERRIDE"];

/// Crate version, for snapshot/event metadata.
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
