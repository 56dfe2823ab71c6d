use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::input::InputConfig;
use crate::scoring::{
    ApprovalConfig, ClickbaitConfig, ConfidenceConfig, DecayConfig, IntegrityConfig, SlopConfig,
    TierConfig, VelocityConfig, VolumeConfig, WeightConfig,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub input: InputConfig,
    pub approval: ApprovalConfig,
    pub volume: VolumeConfig,
    pub velocity: VelocityConfig,
    pub integrity: IntegrityConfig,
    pub clickbait: ClickbaitConfig,
    pub decay: DecayConfig,
    pub slop: SlopConfig,
    pub confidence: ConfidenceConfig,
    pub tiers: TierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VotesConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub cache_ttl_secs: u64,
}

impl Default for VotesConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://returnyoutubedislikeapi.com".to_string(),
            timeout_ms: 5000,
            cache_ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: WeightConfig,
    pub thresholds: ThresholdConfig,
    pub votes: VotesConfig,
}

impl ScoringConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                Self::from_toml(&contents)?
            } else {
                ScoringConfig::default()
            }
        } else {
            ScoringConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| format!("failed to parse config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        let w = &self.weights;
        for (name, value) in [
            ("approval", w.approval),
            ("velocity", w.velocity),
            ("integrity", w.integrity),
            ("volume", w.volume),
            ("clickbait", w.clickbait),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("weights.{} must be non-negative, got {}", name, value));
            }
        }

        let t = &self.thresholds;
        if t.approval.prior_weight <= 0.0 {
            return Err("thresholds.approval.prior_weight must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&t.approval.prior_mean) {
            return Err("thresholds.approval.prior_mean must be within [0, 1]".to_string());
        }
        if t.approval.floor >= t.approval.ceiling {
            return Err(format!(
                "thresholds.approval.floor ({}) must be below ceiling ({})",
                t.approval.floor, t.approval.ceiling
            ));
        }
        if t.input.min_age_days <= 0.0 {
            return Err("thresholds.input.min_age_days must be positive".to_string());
        }
        if !t.input.max_age_days.is_finite() || t.input.max_age_days < t.input.min_age_days {
            return Err("thresholds.input.max_age_days must be finite and >= min_age_days".to_string());
        }
        if t.volume.high_breakpoint <= 0.0 {
            return Err("thresholds.volume.high_breakpoint must be positive".to_string());
        }
        if t.velocity.reference_ratio <= 0.0 {
            return Err("thresholds.velocity.reference_ratio must be positive".to_string());
        }
        if t.velocity.optimal_days <= 0.0 || t.velocity.penalty_horizon_days <= 0.0 {
            return Err("thresholds.velocity day windows must be positive".to_string());
        }
        if t.integrity.target_rate <= 0.0 {
            return Err("thresholds.integrity.target_rate must be positive".to_string());
        }
        if !(t.decay.annual_rate > 0.0 && t.decay.annual_rate <= 1.0) {
            return Err("thresholds.decay.annual_rate must be within (0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&t.slop.penalty) {
            return Err("thresholds.slop.penalty must be within [0, 1]".to_string());
        }
        if t.confidence.low_votes > t.confidence.full_votes {
            return Err("thresholds.confidence.low_votes must not exceed full_votes".to_string());
        }
        if t.tiers.yellow > t.tiers.green {
            return Err(format!(
                "thresholds.tiers.yellow ({}) must not exceed green ({})",
                t.tiers.yellow, t.tiers.green
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("UTILITY_TIER_GREEN") {
            if let Ok(value) = value.parse::<f64>() {
                self.thresholds.tiers.green = value;
            }
        }
        if let Ok(value) = env::var("UTILITY_TIER_YELLOW") {
            if let Ok(value) = value.parse::<f64>() {
                self.thresholds.tiers.yellow = value;
            }
        }
        if let Ok(endpoint) = env::var("UTILITY_VOTES_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.votes.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("UTILITY_VOTES_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.votes.timeout_ms = value;
            }
        }
        if let Ok(ttl) = env::var("UTILITY_VOTES_CACHE_TTL_SECS") {
            if let Ok(value) = ttl.parse::<u64>() {
                self.votes.cache_ttl_secs = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("UTILITY_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/utility.toml")))
}
