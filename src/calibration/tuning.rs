use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::calibration::runner::{tier_distance, CalibrationSample};
use crate::config::ScoringConfig;
use crate::scoring::{UtilityScorer, WeightConfig};

pub struct WeightTuner {
    pub calibration_data: Vec<CalibrationSample>,
    pub iterations: usize,
    pub step: f64,
    pub seed: u64,
}

impl WeightTuner {
    pub fn new(calibration_data: Vec<CalibrationSample>) -> Self {
        Self {
            calibration_data,
            iterations: 200,
            step: 0.2,
            seed: 42,
        }
    }

    pub fn tune(&self, initial_weights: WeightConfig, config: &ScoringConfig) -> (WeightConfig, f64) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best = initial_weights;
        let mut best_score = objective(&best, &self.calibration_data, config);

        for _ in 0..self.iterations {
            let candidate = perturb_weights(&best, &mut rng, self.step);
            let score = objective(&candidate, &self.calibration_data, config);
            if score < best_score {
                best = candidate;
                best_score = score;
            }
        }

        tracing::debug!(best_score, iterations = self.iterations, "weight tuning finished");
        (best, best_score)
    }
}

fn objective(weights: &WeightConfig, data: &[CalibrationSample], config: &ScoringConfig) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let scorer = UtilityScorer::from_parts(weights.clone(), config.thresholds.clone());
    let total: f64 = data
        .iter()
        .map(|sample| {
            let result = scorer.score_raw(&sample.to_signals());
            tier_distance(result.tier, sample.label)
        })
        .sum();

    total / data.len() as f64
}

fn perturb_weights(weights: &WeightConfig, rng: &mut StdRng, scale: f64) -> WeightConfig {
    if !(scale > 0.0) {
        return weights.clone();
    }
    let mut adjust = |value: f64| -> f64 { (value * (1.0 + rng.gen_range(-scale..scale))).max(0.0) };

    WeightConfig {
        approval: adjust(weights.approval),
        velocity: adjust(weights.velocity),
        integrity: adjust(weights.integrity),
        volume: adjust(weights.volume),
        clickbait: adjust(weights.clickbait),
    }
}
