//! Baseline Model
//!
//! Per-channel mean/std statistics computed once from a corpus of
//! known-normal sensor vectors. A model is immutable after build; to
//! change the corpus, build a fresh model and swap it in through the
//! configuration handle. The detection threshold is NOT part of the
//! model - it comes from [`crate::config::DetectionConfig`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::channels::{ChannelVector, CHANNEL_COUNT};
use crate::constants::STD_FLOOR;
use crate::error::DetectionError;

/// Immutable per-channel statistics describing normal sensor behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineModel {
    /// Identity of this snapshot. A rebuilt model gets a fresh id so
    /// downstream consumers can tell snapshots apart.
    pub model_id: Uuid,
    pub built_at: DateTime<Utc>,
    pub sample_count: usize,
    /// Per-channel arithmetic mean, in channel layout order.
    pub mean: Vec<f64>,
    /// Per-channel population standard deviation, floored at
    /// [`STD_FLOOR`] so constant channels cannot divide by zero.
    pub std: Vec<f64>,
}

impl BaselineModel {
    /// Build a model from a corpus of normal samples.
    ///
    /// Every sample must match the current channel layout. An empty
    /// corpus is `InsufficientData`; a sample of the wrong length is
    /// `ShapeMismatch`.
    pub fn build(samples: &[ChannelVector]) -> Result<Self, DetectionError> {
        if samples.is_empty() {
            return Err(DetectionError::InsufficientData);
        }
        for sample in samples {
            sample.validate()?;
        }

        let n = samples.len() as f64;
        let mut mean = vec![0.0f64; CHANNEL_COUNT];
        for sample in samples {
            for (m, v) in mean.iter_mut().zip(sample.as_slice()) {
                *m += v;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        let mut std = vec![0.0f64; CHANNEL_COUNT];
        for sample in samples {
            for (s, (v, m)) in std.iter_mut().zip(sample.as_slice().iter().zip(&mean)) {
                *s += (v - m).powi(2);
            }
        }
        for s in std.iter_mut() {
            *s = (*s / n).sqrt().max(STD_FLOOR);
        }

        let model = Self {
            model_id: Uuid::new_v4(),
            built_at: Utc::now(),
            sample_count: samples.len(),
            mean,
            std,
        };
        log::info!(
            "Baseline model {} built from {} samples",
            model.model_id,
            model.sample_count
        );
        Ok(model)
    }

    pub fn channel_count(&self) -> usize {
        self.mean.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(rows: &[[f64; CHANNEL_COUNT]]) -> Vec<ChannelVector> {
        rows.iter().map(|r| ChannelVector::from_values(r.to_vec())).collect()
    }

    #[test]
    fn test_empty_corpus_is_insufficient_data() {
        assert_eq!(BaselineModel::build(&[]), Err(DetectionError::InsufficientData));
    }

    #[test]
    fn test_single_sample_corpus() {
        let samples = corpus(&[[50.0, 1013.0, 45.0, 12.5, 2.1]]);
        let model = BaselineModel::build(&samples).unwrap();
        assert_eq!(model.mean, vec![50.0, 1013.0, 45.0, 12.5, 2.1]);
        // Constant channels get the floor, never zero.
        assert!(model.std.iter().all(|s| *s == STD_FLOOR));
        assert_eq!(model.sample_count, 1);
    }

    #[test]
    fn test_population_statistics() {
        let samples = corpus(&[
            [1.0, 0.0, 0.0, 0.0, 0.0],
            [3.0, 0.0, 0.0, 0.0, 0.0],
        ]);
        let model = BaselineModel::build(&samples).unwrap();
        assert_eq!(model.mean[0], 2.0);
        // Population std of {1, 3} is 1, not the sample std sqrt(2).
        assert!((model.std[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_length_sample_rejected() {
        let samples = vec![
            ChannelVector::from_values(vec![0.0; CHANNEL_COUNT]),
            ChannelVector::from_values(vec![0.0; 3]),
        ];
        assert!(matches!(
            BaselineModel::build(&samples),
            Err(DetectionError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_rebuild_gets_fresh_identity() {
        let samples = corpus(&[[50.0, 1013.0, 45.0, 12.5, 2.1]]);
        let a = BaselineModel::build(&samples).unwrap();
        let b = BaselineModel::build(&samples).unwrap();
        assert_ne!(a.model_id, b.model_id);
    }
}
