use serde::Serialize;

use crate::scoring::WeightConfig;
use crate::{Confidence, ScoreResult, Tier};

const NEGATIVE_COMPONENT: f64 = 0.3;
const CLICKBAIT_WARNING: f64 = 0.3;
const DECAY_WARNING: f64 = 0.7;
const POSITIVE_IMPACT: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    None,
    Light,
    Moderate,
    Severe,
}

impl Impact {
    pub fn from_component(value: f64, weight: f64) -> Self {
        if value >= POSITIVE_IMPACT {
            return Impact::Positive;
        }
        let loss = (1.0 - value) * weight;
        if loss > 0.15 {
            Impact::Severe
        } else if loss > 0.08 {
            Impact::Moderate
        } else if loss > 0.03 {
            Impact::Light
        } else {
            Impact::None
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentImpact {
    pub name: &'static str,
    pub value: f64,
    pub impact: Impact,
}

#[derive(Debug, Clone, Serialize)]
pub struct Breakdown {
    pub tier: Tier,
    pub tier_label: &'static str,
    pub legacy_tier: &'static str,
    pub components: Vec<ComponentImpact>,
    pub negative_factors: Vec<&'static str>,
    pub warnings: Vec<String>,
    pub confidence_note: Option<&'static str>,
    pub interaction_density: f64,
}

pub fn confidence_note(confidence: Confidence) -> Option<&'static str> {
    match confidence {
        Confidence::Full => None,
        Confidence::LowSample => Some("~ Low Sample"),
        Confidence::LowConfidence => Some("~ Low Confidence"),
    }
}

pub fn negative_factors(result: &ScoreResult) -> Vec<&'static str> {
    let d = &result.diagnostics;
    let mut factors = Vec::new();
    if d.approval < NEGATIVE_COMPONENT {
        factors.push("approval");
    }
    if d.velocity < NEGATIVE_COMPONENT {
        factors.push("velocity");
    }
    if d.integrity < NEGATIVE_COMPONENT {
        factors.push("integrity");
    }
    if d.volume < NEGATIVE_COMPONENT {
        factors.push("volume");
    }
    if result.clickbait_score > CLICKBAIT_WARNING {
        factors.push("clickbait");
    }
    if d.decay < DECAY_WARNING {
        factors.push("decay");
    }
    factors
}

pub fn explain(result: &ScoreResult, weights: &WeightConfig) -> Breakdown {
    let d = &result.diagnostics;
    let components = [
        ("approval", d.approval, weights.approval),
        ("velocity", d.velocity, weights.velocity),
        ("integrity", d.integrity, weights.integrity),
        ("volume", d.volume, weights.volume),
    ]
    .into_iter()
    .map(|(name, value, weight)| ComponentImpact {
        name,
        value,
        impact: Impact::from_component(value, weight),
    })
    .collect();

    let mut warnings = Vec::new();
    if result.slop_flag {
        warnings.push("Low Interaction".to_string());
    }
    if result.clickbait_score > CLICKBAIT_WARNING {
        warnings.push("Clickbait".to_string());
    }
    let confidence_note = confidence_note(result.confidence);
    if let Some(note) = confidence_note {
        warnings.push(note.to_string());
    }

    Breakdown {
        tier: result.tier,
        tier_label: result.tier.label(),
        legacy_tier: result.tier.legacy_name(),
        components,
        negative_factors: negative_factors(result),
        warnings,
        confidence_note,
        interaction_density: result.interaction_density(),
    }
}
