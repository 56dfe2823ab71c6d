use serde::{Deserialize, Serialize};

use crate::ScoreInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrityConfig {
    pub target_rate: f64,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self { target_rate: 0.03 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrityEstimate {
    pub interaction_rate: f64,
    pub integrity: f64,
}

#[derive(Debug, Clone)]
pub struct IntegrityEstimator {
    config: IntegrityConfig,
}

impl IntegrityEstimator {
    pub fn new(config: IntegrityConfig) -> Self {
        Self { config }
    }

    pub fn interaction_rate(input: &ScoreInput) -> f64 {
        if input.view_count == 0 {
            return 0.0;
        }
        input.effective_votes() as f64 / input.view_count as f64
    }

    pub fn score(&self, input: &ScoreInput) -> IntegrityEstimate {
        let interaction_rate = Self::interaction_rate(input);
        let integrity = if self.config.target_rate > 0.0 {
            (interaction_rate / self.config.target_rate).min(1.0)
        } else {
            1.0
        };
        IntegrityEstimate {
            interaction_rate,
            integrity,
        }
    }
}
