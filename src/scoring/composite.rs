use serde::{Deserialize, Serialize};

use crate::{clamp01, round1, Confidence, ScoreInput, Tier};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub approval: f64,
    pub velocity: f64,
    pub integrity: f64,
    pub volume: f64,
    pub clickbait: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            approval: 0.45,
            velocity: 0.25,
            integrity: 0.15,
            volume: 0.10,
            clickbait: 0.025,
        }
    }
}

impl WeightConfig {
    pub fn positive_budget(&self) -> f64 {
        self.approval + self.velocity + self.integrity + self.volume
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub annual_rate: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self { annual_rate: 0.95 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopConfig {
    pub interaction_threshold: f64,
    pub min_views: u64,
    pub penalty: f64,
}

impl Default for SlopConfig {
    fn default() -> Self {
        Self {
            interaction_threshold: 0.001,
            min_views: 5_000,
            penalty: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub full_votes: u64,
    pub low_votes: u64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            full_votes: 50,
            low_votes: 5,
        }
    }
}

impl ConfidenceConfig {
    pub fn classify(&self, effective_votes: u64) -> Confidence {
        if effective_votes >= self.full_votes {
            Confidence::Full
        } else if effective_votes >= self.low_votes {
            Confidence::LowSample
        } else {
            Confidence::LowConfidence
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    pub green: f64,
    pub yellow: f64,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            green: 70.0,
            yellow: 45.0,
        }
    }
}

impl TierConfig {
    pub fn classify(&self, score: f64) -> Tier {
        if score >= self.green {
            Tier::Green
        } else if score >= self.yellow {
            Tier::Yellow
        } else {
            Tier::Red
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComponentScores {
    pub approval: f64,
    pub volume: f64,
    pub velocity: f64,
    pub integrity: f64,
    pub clickbait: f64,
    pub interaction_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assembled {
    pub composite: f64,
    pub decay: f64,
    pub pre_floor_score: f64,
    pub score: f64,
    pub slop_flag: bool,
    pub confidence: Confidence,
    pub tier: Tier,
}

#[derive(Debug, Clone)]
pub struct CompositeAssembler {
    weights: WeightConfig,
    decay: DecayConfig,
    slop: SlopConfig,
    confidence: ConfidenceConfig,
    tiers: TierConfig,
}

impl CompositeAssembler {
    pub fn new(
        weights: WeightConfig,
        decay: DecayConfig,
        slop: SlopConfig,
        confidence: ConfidenceConfig,
        tiers: TierConfig,
    ) -> Self {
        Self {
            weights,
            decay,
            slop,
            confidence,
            tiers,
        }
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    pub fn weighted_sum(&self, components: &ComponentScores) -> f64 {
        let mut composite = 0.0;

        composite += components.approval * self.weights.approval;
        composite += components.volume * self.weights.volume;
        composite += components.velocity * self.weights.velocity;
        composite += components.integrity * self.weights.integrity;
        composite -= components.clickbait * self.weights.clickbait;

        clamp01(composite)
    }

    pub fn decay_factor(&self, days_old: f64) -> f64 {
        clamp01(self.decay.annual_rate.powf(days_old / 365.0))
    }

    pub fn is_slop(&self, interaction_rate: f64, view_count: u64) -> bool {
        interaction_rate < self.slop.interaction_threshold && view_count > self.slop.min_views
    }

    pub fn assemble(&self, input: &ScoreInput, components: &ComponentScores) -> Assembled {
        let composite = self.weighted_sum(components);
        let decay = self.decay_factor(input.days_old);
        let pre_floor_score = (composite * decay * 100.0).clamp(0.0, 100.0);

        let mut score = pre_floor_score;
        let slop_flag = self.is_slop(components.interaction_rate, input.view_count);
        if slop_flag {
            score *= self.slop.penalty;
            tracing::trace!(
                interaction_rate = components.interaction_rate,
                views = input.view_count,
                "slop floor applied"
            );
        }
        let score = score.clamp(0.0, 100.0);
        let tier = self.tiers.classify(score);

        Assembled {
            composite,
            decay,
            pre_floor_score,
            score: round1(score),
            slop_flag,
            confidence: self.confidence.classify(input.effective_votes()),
            tier,
        }
    }
}
