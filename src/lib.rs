pub mod age;
pub mod calibration;
pub mod config;
pub mod explain;
pub mod input;
pub mod scoring;
pub mod votes;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::ScoringConfig;
use crate::scoring::UtilityScorer;

pub use crate::input::{RawSignals, ScoreInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Green,
    Yellow,
    Red,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Green => "green",
            Tier::Yellow => "yellow",
            Tier::Red => "red",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Green => "Verified Utility",
            Tier::Yellow => "Standard",
            Tier::Red => "Low Utility / Slop",
        }
    }

    pub fn legacy_name(self) -> &'static str {
        match self {
            Tier::Green => "organic",
            Tier::Yellow => "filler",
            Tier::Red => "synthetic",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Tier::Red => 0,
            Tier::Yellow => 1,
            Tier::Green => 2,
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "green" | "organic" => Ok(Tier::Green),
            "yellow" | "filler" => Ok(Tier::Yellow),
            "red" | "synthetic" | "slop" => Ok(Tier::Red),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Full,
    LowSample,
    LowConfidence,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Full => "full",
            Confidence::LowSample => "low_sample",
            Confidence::LowConfidence => "low_confidence",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub approval: f64,
    pub smoothed_ratio: f64,
    pub volume: f64,
    pub velocity: f64,
    pub velocity_base: f64,
    pub recency_multiplier: f64,
    pub engagement_velocity: f64,
    pub view_subscriber_ratio: f64,
    pub integrity: f64,
    pub interaction_rate: f64,
    pub clickbait: f64,
    pub keyword_hits: Vec<String>,
    pub composite: f64,
    pub decay: f64,
    pub pre_floor_score: f64,
    pub effective_votes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub tier: Tier,
    pub confidence: Confidence,
    pub slop_flag: bool,
    pub clickbait_score: f64,
    pub diagnostics: Diagnostics,
}

impl ScoreResult {
    pub fn interaction_density(&self) -> f64 {
        (self.diagnostics.interaction_rate * 100.0 * 100.0).round() / 100.0
    }
}

pub fn score(raw: &RawSignals) -> ScoreResult {
    score_with_config(raw, &ScoringConfig::default())
}

pub fn score_with_config(raw: &RawSignals, config: &ScoringConfig) -> ScoreResult {
    UtilityScorer::new(config).score_raw(raw)
}

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
