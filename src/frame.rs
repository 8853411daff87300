//! Telemetry Frame Types
//!
//! Input shapes for one periodic telemetry frame from a vehicle.
//! No detection logic here - just data structures and pre-detection
//! validation.

use serde::{Deserialize, Serialize};

use crate::error::DetectionError;

/// Positioning reading from the vehicle's GPS unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsReading {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub speed: f64,
}

/// One sample of the five monitored sensor channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub voltage: f64,
    pub current: f64,
}

impl SensorReading {
    fn values(&self) -> [f64; 5] {
        [self.temperature, self.pressure, self.humidity, self.voltage, self.current]
    }
}

/// A batch of control commands with its integrity checksum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlBatch {
    pub commands: Vec<i64>,
    pub source: String,
    pub checksum: i64,
}

/// One full telemetry frame as received from a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub vehicle_id: String,
    pub gps: GpsReading,
    pub sensors: SensorReading,
    pub control: ControlBatch,
}

impl TelemetryFrame {
    /// Reject malformed frames before any detector runs. A rejected
    /// frame produces no threat.
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.vehicle_id.trim().is_empty() {
            return Err(DetectionError::InvalidFrame("vehicle_id is empty".to_string()));
        }
        for (name, value) in [
            ("latitude", self.gps.latitude),
            ("longitude", self.gps.longitude),
            ("altitude", self.gps.altitude),
            ("speed", self.gps.speed),
        ] {
            if !value.is_finite() {
                return Err(DetectionError::InvalidFrame(format!("gps.{} is not finite", name)));
            }
        }
        for (i, value) in self.sensors.values().iter().enumerate() {
            if !value.is_finite() {
                return Err(DetectionError::InvalidFrame(format!(
                    "sensor channel {} is not finite",
                    crate::channels::CHANNEL_LAYOUT[i]
                )));
            }
        }
        Ok(())
    }
}
