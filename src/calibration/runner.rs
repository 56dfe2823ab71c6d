use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::scoring::UtilityScorer;
use crate::{RawSignals, ScoreResult, Tier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub video_id: String,
    pub likes: i64,
    pub dislikes: i64,
    pub view_count: i64,
    pub subscribers: Option<i64>,
    pub days_old: Option<f64>,
    pub title: Option<String>,
    pub label: Tier,
    pub rating: Option<f64>,
}

impl CalibrationSample {
    pub fn to_signals(&self) -> RawSignals {
        RawSignals {
            likes: Some(self.likes),
            dislikes: Some(self.dislikes),
            view_count: Some(self.view_count),
            subscribers: self.subscribers,
            days_old: self.days_old,
            title: self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalibrationMetrics {
    pub tier_accuracy: f64,
    pub mean_tier_distance: f64,
    pub pairwise_ranking_accuracy: f64,
    pub mean_score: f64,
    pub slop_flagged: usize,
    pub sample_count: usize,
}

pub struct CalibrationRunner {
    pub samples: Vec<CalibrationSample>,
}

impl CalibrationRunner {
    pub fn new(samples: Vec<CalibrationSample>) -> Self {
        Self { samples }
    }

    pub fn from_json(data: &str) -> Result<Self, String> {
        let samples: Vec<CalibrationSample> = serde_json::from_str(data)
            .map_err(|err| format!("failed to parse calibration samples: {}", err))?;
        Ok(Self::new(samples))
    }

    pub fn score_all(&self, config: &ScoringConfig) -> Vec<ScoreResult> {
        let scorer = UtilityScorer::new(config);
        self.samples
            .iter()
            .map(|sample| scorer.score_raw(&sample.to_signals()))
            .collect()
    }

    pub fn compute_metrics(&self, config: &ScoringConfig) -> CalibrationMetrics {
        if self.samples.is_empty() {
            return CalibrationMetrics::default();
        }

        let results = self.score_all(config);

        let mut matches = 0usize;
        let mut distances = Vec::with_capacity(results.len());
        let mut scores = Vec::with_capacity(results.len());
        let mut rated_scores = Vec::new();
        let mut ratings = Vec::new();
        let mut slop_flagged = 0usize;

        for (sample, result) in self.samples.iter().zip(results.iter()) {
            if result.tier == sample.label {
                matches += 1;
            }
            distances.push(tier_distance(result.tier, sample.label));
            scores.push(result.score);
            if result.slop_flag {
                slop_flagged += 1;
            }
            if let Some(rating) = sample.rating {
                rated_scores.push(result.score);
                ratings.push(rating);
            }
        }

        CalibrationMetrics {
            tier_accuracy: matches as f64 / self.samples.len() as f64,
            mean_tier_distance: mean(&distances),
            pairwise_ranking_accuracy: pairwise_accuracy(&rated_scores, &ratings),
            mean_score: mean(&scores),
            slop_flagged,
            sample_count: self.samples.len(),
        }
    }
}

pub(crate) fn tier_distance(predicted: Tier, actual: Tier) -> f64 {
    (predicted.rank() as f64 - actual.rank() as f64).abs()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn pairwise_accuracy(predicted: &[f64], actual: &[f64]) -> f64 {
    let mut correct = 0usize;
    let mut total = 0usize;

    for i in 0..predicted.len() {
        for j in (i + 1)..predicted.len() {
            let pred_order = predicted[i].partial_cmp(&predicted[j]);
            let actual_order = actual[i].partial_cmp(&actual[j]);
            if let (Some(pred), Some(act)) = (pred_order, actual_order) {
                if pred == act {
                    correct += 1;
                }
                total += 1;
            }
        }
    }

    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}
