//! Sensor Channel Layout
//!
//! **This file controls the channel schema.**
//!
//! The baseline model, the anomaly scorer, and every stored z-score
//! vector all assume the order defined here. Rules:
//! 1. Add a channel → increment CHANNEL_VERSION
//! 2. Change order → increment CHANNEL_VERSION
//! 3. Remove a channel → increment CHANNEL_VERSION
//!
//! A baseline built against one version must never score a vector from
//! another.

use serde::{Deserialize, Serialize};

use crate::error::DetectionError;
use crate::frame::SensorReading;

/// Current channel layout version.
pub const CHANNEL_VERSION: u8 = 1;

/// Channel names, in the exact order values appear in a vector.
/// This is the single source of truth for channel ordering.
pub const CHANNEL_LAYOUT: &[&str] = &[
    "temperature", // 0: degrees C
    "pressure",    // 1: hPa
    "humidity",    // 2: percent
    "voltage",     // 3: volts
    "current",     // 4: amps
];

/// Total number of sensor channels.
pub const CHANNEL_COUNT: usize = 5;

/// Index of a channel by name, if it exists in the layout.
pub fn channel_index(name: &str) -> Option<usize> {
    CHANNEL_LAYOUT.iter().position(|c| *c == name)
}

// ============================================================================
// CHANNEL VECTOR
// ============================================================================

/// Ordered sensor readings for one frame, tagged with the layout
/// version they were captured under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelVector {
    pub version: u8,
    pub values: Vec<f64>,
}

impl ChannelVector {
    /// Build from raw values in layout order.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { version: CHANNEL_VERSION, values }
    }

    /// Flatten a sensor reading into layout order.
    pub fn from_sensors(sensors: &SensorReading) -> Self {
        Self::from_values(vec![
            sensors.temperature,
            sensors.pressure,
            sensors.humidity,
            sensors.voltage,
            sensors.current,
        ])
    }

    /// Check this vector against the current layout.
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.values.len() != CHANNEL_COUNT {
            return Err(DetectionError::ShapeMismatch {
                expected: CHANNEL_COUNT,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    /// Value for a named channel.
    pub fn get(&self, name: &str) -> Option<f64> {
        channel_index(name).and_then(|i| self.values.get(i).copied())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_count_matches() {
        assert_eq!(CHANNEL_LAYOUT.len(), CHANNEL_COUNT);
    }

    #[test]
    fn test_from_sensors_ordering() {
        let sensors = SensorReading {
            temperature: 50.0,
            pressure: 1013.0,
            humidity: 45.0,
            voltage: 12.5,
            current: 2.1,
        };
        let v = ChannelVector::from_sensors(&sensors);
        assert_eq!(v.values, vec![50.0, 1013.0, 45.0, 12.5, 2.1]);
        assert_eq!(v.get("voltage"), Some(12.5));
        assert_eq!(v.get("flux"), None);
    }

    #[test]
    fn test_validate_rejects_wrong_length() {
        let v = ChannelVector::from_values(vec![1.0, 2.0]);
        assert_eq!(
            v.validate(),
            Err(DetectionError::ShapeMismatch { expected: CHANNEL_COUNT, actual: 2 })
        );
        let ok = ChannelVector::from_values(vec![0.0; CHANNEL_COUNT]);
        assert!(ok.validate().is_ok());
    }
}
