use serde::{Deserialize, Serialize};

use crate::{clamp01, ScoreInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalConfig {
    pub prior_weight: f64,
    pub prior_mean: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            prior_weight: 10.0,
            prior_mean: 0.5,
            floor: 0.92,
            ceiling: 0.98,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApprovalEstimate {
    pub smoothed_ratio: f64,
    pub approval: f64,
}

#[derive(Debug, Clone)]
pub struct ApprovalEstimator {
    config: ApprovalConfig,
}

impl ApprovalEstimator {
    pub fn new(config: ApprovalConfig) -> Self {
        Self { config }
    }

    pub fn smoothed_ratio(&self, likes: u64, dislikes: u64) -> f64 {
        let likes = likes as f64;
        let votes = likes + dislikes as f64;
        let laplace = (likes + 1.0) / (votes + 2.0);
        let denom = votes + self.config.prior_weight;
        if denom <= 0.0 {
            return self.config.prior_mean;
        }
        (laplace * votes + self.config.prior_weight * self.config.prior_mean) / denom
    }

    pub fn rescale(&self, ratio: f64) -> f64 {
        let range = self.config.ceiling - self.config.floor;
        if range <= 0.0 {
            return if ratio >= self.config.ceiling { 1.0 } else { 0.0 };
        }
        clamp01((ratio - self.config.floor) / range)
    }

    pub fn score(&self, input: &ScoreInput) -> ApprovalEstimate {
        let smoothed_ratio = self.smoothed_ratio(input.likes, input.dislikes);
        ApprovalEstimate {
            smoothed_ratio,
            approval: self.rescale(smoothed_ratio),
        }
    }
}
