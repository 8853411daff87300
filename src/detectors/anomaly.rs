//! Anomaly Scorer
//!
//! Multi-channel z-score deviation against the current baseline model.
//! The single worst-offending channel drives the verdict: one wildly
//! deviant channel is enough to flag, no matter how normal the rest
//! look.

use serde::{Deserialize, Serialize};

use crate::baseline::BaselineModel;
use crate::channels::ChannelVector;
use crate::constants::STD_FLOOR;
use crate::error::DetectionError;

/// Where a score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrigin {
    /// Scored against an installed baseline model.
    ZScore,
    /// No baseline installed yet; the benign default was returned.
    BaselineUnavailable,
}

/// Per-frame anomaly verdict with its diagnostic breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub is_anomaly: bool,
    /// Max absolute per-channel z-score.
    pub score: f64,
    /// score / threshold, capped at 1.0.
    pub confidence: f64,
    /// Per-channel z-scores, in channel layout order. Empty when the
    /// baseline was unavailable.
    pub z_scores: Vec<f64>,
    pub threshold: f64,
    pub origin: ScoreOrigin,
}

impl AnomalyResult {
    /// Benign default for the uninitialized-model startup window.
    fn baseline_unavailable(threshold: f64) -> Self {
        Self {
            is_anomaly: false,
            score: 0.0,
            confidence: 0.0,
            z_scores: Vec::new(),
            threshold,
            origin: ScoreOrigin::BaselineUnavailable,
        }
    }
}

/// Score one reading against the baseline.
///
/// A missing model is an expected transient startup state, not an
/// error: the result is benign with zero score and confidence. A
/// reading whose length disagrees with the model is `ShapeMismatch`.
pub fn score(
    model: Option<&BaselineModel>,
    threshold: f64,
    reading: &ChannelVector,
) -> Result<AnomalyResult, DetectionError> {
    let model = match model {
        Some(m) => m,
        None => return Ok(AnomalyResult::baseline_unavailable(threshold)),
    };

    if reading.len() != model.channel_count() {
        return Err(DetectionError::ShapeMismatch {
            expected: model.channel_count(),
            actual: reading.len(),
        });
    }

    let z_scores: Vec<f64> = reading
        .as_slice()
        .iter()
        .zip(model.mean.iter().zip(&model.std))
        .map(|(value, (mean, std))| (value - mean).abs() / std.max(STD_FLOOR))
        .collect();

    let score = z_scores.iter().fold(0.0f64, |acc, z| acc.max(*z));
    // Strict inequality: a reading exactly at the threshold is benign.
    let is_anomaly = score > threshold;
    let confidence = (score / threshold).min(1.0);

    Ok(AnomalyResult {
        is_anomaly,
        score,
        confidence,
        z_scores,
        threshold,
        origin: ScoreOrigin::ZScore,
    })
}
