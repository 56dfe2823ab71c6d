pub mod approval;
pub mod clickbait;
pub mod composite;
pub mod integrity;
pub mod pipeline;
pub mod velocity;
pub mod volume;

pub use approval::{ApprovalConfig, ApprovalEstimate, ApprovalEstimator};
pub use clickbait::{ClickbaitConfig, ClickbaitDetector, ClickbaitSignals};
pub use composite::{
    Assembled, ComponentScores, CompositeAssembler, ConfidenceConfig, DecayConfig, SlopConfig,
    TierConfig, WeightConfig,
};
pub use integrity::{IntegrityConfig, IntegrityEstimate, IntegrityEstimator};
pub use pipeline::UtilityScorer;
pub use velocity::{VelocityConfig, VelocityEstimate, VelocityEstimator};
pub use volume::{VolumeConfig, VolumeEstimator};
