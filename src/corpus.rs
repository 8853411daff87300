//! Baseline Corpus Source
//!
//! Synthetic normal-operation samples for building a baseline model
//! when no recorded fleet corpus is available. The distributions match
//! nominal operating conditions for the five monitored channels.

use rand::Rng;

use crate::channels::ChannelVector;

/// Nominal (mean, std) per channel, in layout order.
const NOMINAL: [(f64, f64); 5] = [
    (50.0, 5.0),   // temperature
    (1013.0, 3.0), // pressure
    (45.0, 5.0),   // humidity
    (12.5, 0.3),   // voltage
    (2.1, 0.1),    // current
];

/// Standard normal draw via Box-Muller.
fn gauss<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// One synthetic normal sample.
pub fn normal_sample<R: Rng>(rng: &mut R) -> ChannelVector {
    ChannelVector::from_values(
        NOMINAL.iter().map(|(mean, std)| mean + gauss(rng) * std).collect(),
    )
}

/// A corpus of `n` synthetic normal samples.
pub fn generate_normal_corpus<R: Rng>(rng: &mut R, n: usize) -> Vec<ChannelVector> {
    (0..n).map(|_| normal_sample(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::BaselineModel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_corpus_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let corpus = generate_normal_corpus(&mut rng, 100);
        assert_eq!(corpus.len(), 100);
        assert!(corpus.iter().all(|s| s.validate().is_ok()));
    }

    #[test]
    fn test_corpus_statistics_near_nominal() {
        let mut rng = StdRng::seed_from_u64(42);
        let corpus = generate_normal_corpus(&mut rng, 2000);
        let model = BaselineModel::build(&corpus).unwrap();
        for (i, (mean, std)) in NOMINAL.iter().enumerate() {
            assert!(
                (model.mean[i] - mean).abs() < std * 0.2,
                "channel {} mean {} drifted from nominal {}",
                i,
                model.mean[i],
                mean
            );
            assert!(model.std[i] > 0.0 && model.std[i] < std * 1.5);
        }
    }
}
