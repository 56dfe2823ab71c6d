use serde::{Deserialize, Serialize};

use crate::{clamp01, ScoreInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityConfig {
    pub reference_ratio: f64,
    pub optimal_days: f64,
    pub max_recency_boost: f64,
    pub penalty_horizon_days: f64,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            reference_ratio: 50.0,
            optimal_days: 7.0,
            max_recency_boost: 0.2,
            penalty_horizon_days: 365.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityEstimate {
    pub view_subscriber_ratio: f64,
    pub base: f64,
    pub recency_multiplier: f64,
    /// Reported for explanation only; it does not feed `velocity`.
    pub engagement_velocity: f64,
    pub velocity: f64,
}

#[derive(Debug, Clone)]
pub struct VelocityEstimator {
    config: VelocityConfig,
}

impl VelocityEstimator {
    pub fn new(config: VelocityConfig) -> Self {
        Self { config }
    }

    pub fn recency_multiplier(&self, days_old: f64) -> f64 {
        let window = self.config.optimal_days;
        if window > 0.0 && days_old <= window {
            return 1.0 + self.config.max_recency_boost * (1.0 - days_old / window);
        }
        let horizon = self.config.penalty_horizon_days;
        if horizon <= 0.0 {
            return 1.0;
        }
        1.0 / (1.0 + (1.0 + days_old / horizon).ln())
    }

    pub fn score(&self, input: &ScoreInput) -> VelocityEstimate {
        let views = input.view_count as f64;
        let view_subscriber_ratio = views / input.subscribers as f64;

        let reference = (1.0 + self.config.reference_ratio.max(0.0)).ln();
        let base = if reference > 0.0 {
            clamp01((1.0 + view_subscriber_ratio).ln() / reference)
        } else {
            0.0
        };

        let engagement_velocity = if input.view_count == 0 {
            0.0
        } else {
            input.effective_votes() as f64 / views / input.age_days
        };

        let recency_multiplier = self.recency_multiplier(input.days_old);

        VelocityEstimate {
            view_subscriber_ratio,
            base,
            recency_multiplier,
            engagement_velocity,
            velocity: clamp01(base * recency_multiplier),
        }
    }
}
