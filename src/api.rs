use serde::{Deserialize, Serialize};
use utility_filter::age::parse_relative_age;
use utility_filter::explain::Breakdown;
use utility_filter::{Confidence, Diagnostics, RawSignals, ScoreResult, Tier};

#[derive(Debug, Deserialize)]
pub struct ApiScoreRequest {
    pub video_id: Option<String>,
    pub likes: Option<i64>,
    pub dislikes: Option<i64>,
    pub view_count: Option<i64>,
    pub subscribers: Option<i64>,
    pub days_old: Option<f64>,
    pub age_text: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug)]
pub enum ScorePlan {
    Ready(RawSignals),
    FetchVotes {
        video_id: String,
        subscribers: Option<i64>,
        days_old: Option<f64>,
        title: Option<String>,
    },
}

impl ApiScoreRequest {
    pub fn into_plan(self) -> Result<ScorePlan, String> {
        let days_old = match self.age_text.as_deref() {
            Some(text) if self.days_old.is_none() => Some(
                parse_relative_age(text).ok_or_else(|| format!("unrecognised age_text: {}", text))?,
            ),
            _ => self.days_old,
        };
        let title = self
            .title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty());

        let raw = RawSignals {
            likes: self.likes,
            dislikes: self.dislikes,
            view_count: self.view_count,
            subscribers: self.subscribers,
            days_old,
            title,
        };
        if raw.has_votes() {
            return Ok(ScorePlan::Ready(raw));
        }

        let video_id = self
            .video_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                "vote data unavailable: provide likes, dislikes and view_count or a video_id"
                    .to_string()
            })?;

        Ok(ScorePlan::FetchVotes {
            video_id,
            subscribers: raw.subscribers,
            days_old: raw.days_old,
            title: raw.title,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiScoreResponse {
    pub video_id: Option<String>,
    pub score: f64,
    pub tier: Tier,
    pub tier_label: String,
    pub confidence: Confidence,
    pub slop_flag: bool,
    pub clickbait_score: f64,
    pub interaction_density: f64,
    pub diagnostics: Diagnostics,
    pub breakdown: Breakdown,
}

impl ApiScoreResponse {
    pub fn from_result(result: ScoreResult, breakdown: Breakdown, video_id: Option<String>) -> Self {
        Self {
            video_id,
            score: result.score,
            tier: result.tier,
            tier_label: result.tier.label().to_string(),
            confidence: result.confidence,
            slop_flag: result.slop_flag,
            clickbait_score: result.clickbait_score,
            interaction_density: result.interaction_density(),
            diagnostics: result.diagnostics,
            breakdown,
        }
    }
}
