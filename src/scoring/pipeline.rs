use crate::config::{ScoringConfig, ThresholdConfig};
use crate::input::InputConfig;
use crate::scoring::{
    ApprovalEstimator, ClickbaitDetector, ComponentScores, CompositeAssembler, IntegrityEstimator,
    VelocityEstimator, VolumeEstimator, WeightConfig,
};
use crate::{Diagnostics, RawSignals, ScoreInput, ScoreResult};

#[derive(Debug, Clone)]
pub struct UtilityScorer {
    input: InputConfig,
    approval: ApprovalEstimator,
    volume: VolumeEstimator,
    velocity: VelocityEstimator,
    integrity: IntegrityEstimator,
    clickbait: ClickbaitDetector,
    assembler: CompositeAssembler,
}

impl UtilityScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self::from_parts(config.weights.clone(), config.thresholds.clone())
    }

    pub fn from_parts(weights: WeightConfig, thresholds: ThresholdConfig) -> Self {
        let ThresholdConfig {
            input,
            approval,
            volume,
            velocity,
            integrity,
            clickbait,
            decay,
            slop,
            confidence,
            tiers,
        } = thresholds;

        Self {
            input,
            approval: ApprovalEstimator::new(approval),
            volume: VolumeEstimator::new(volume),
            velocity: VelocityEstimator::new(velocity),
            integrity: IntegrityEstimator::new(integrity),
            clickbait: ClickbaitDetector::new(clickbait),
            assembler: CompositeAssembler::new(weights, decay, slop, confidence, tiers),
        }
    }

    pub fn weights(&self) -> &WeightConfig {
        self.assembler.weights()
    }

    pub fn normalize(&self, raw: &RawSignals) -> ScoreInput {
        raw.normalize(&self.input)
    }

    pub fn score_raw(&self, raw: &RawSignals) -> ScoreResult {
        self.score(&self.normalize(raw))
    }

    pub fn score(&self, input: &ScoreInput) -> ScoreResult {
        let approval = self.approval.score(input);
        let volume = self.volume.score(input);
        let velocity = self.velocity.score(input);
        let integrity = self.integrity.score(input);
        let clickbait = self.clickbait.signals(&input.title);

        let components = ComponentScores {
            approval: approval.approval,
            volume,
            velocity: velocity.velocity,
            integrity: integrity.integrity,
            clickbait: clickbait.score,
            interaction_rate: integrity.interaction_rate,
        };
        let assembled = self.assembler.assemble(input, &components);

        ScoreResult {
            score: assembled.score,
            tier: assembled.tier,
            confidence: assembled.confidence,
            slop_flag: assembled.slop_flag,
            clickbait_score: clickbait.score,
            diagnostics: Diagnostics {
                approval: approval.approval,
                smoothed_ratio: approval.smoothed_ratio,
                volume,
                velocity: velocity.velocity,
                velocity_base: velocity.base,
                recency_multiplier: velocity.recency_multiplier,
                engagement_velocity: velocity.engagement_velocity,
                view_subscriber_ratio: velocity.view_subscriber_ratio,
                integrity: integrity.integrity,
                interaction_rate: integrity.interaction_rate,
                clickbait: clickbait.score,
                keyword_hits: clickbait.keyword_hits,
                composite: assembled.composite,
                decay: assembled.decay,
                pre_floor_score: assembled.pre_floor_score,
                effective_votes: input.effective_votes(),
            },
        }
    }
}
