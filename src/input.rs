use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSignals {
    pub likes: Option<i64>,
    pub dislikes: Option<i64>,
    pub view_count: Option<i64>,
    pub subscribers: Option<i64>,
    pub days_old: Option<f64>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub min_age_days: f64,
    pub max_age_days: f64,
    pub min_subscribers: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_age_days: 0.1,
            max_age_days: 36_500.0,
            min_subscribers: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub likes: u64,
    pub dislikes: u64,
    pub view_count: u64,
    pub subscribers: u64,
    pub days_old: f64,
    pub age_days: f64,
    pub title: String,
}

impl ScoreInput {
    pub fn effective_votes(&self) -> u64 {
        self.likes.saturating_add(self.dislikes)
    }
}

impl RawSignals {
    pub fn new(likes: i64, dislikes: i64, view_count: i64, subscribers: i64, days_old: f64) -> Self {
        Self {
            likes: Some(likes),
            dislikes: Some(dislikes),
            view_count: Some(view_count),
            subscribers: Some(subscribers),
            days_old: Some(days_old),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn has_votes(&self) -> bool {
        self.likes.is_some() && self.dislikes.is_some() && self.view_count.is_some()
    }

    /// Missing subscriber counts become zero and then the floor, so an
    /// unknown channel is scored as a small one. Ages past `max_age_days`,
    /// including infinity, are held at that cap.
    pub fn normalize(&self, config: &InputConfig) -> ScoreInput {
        let min_subscribers = config.min_subscribers.max(1);
        let min_age = if config.min_age_days.is_finite() && config.min_age_days > 0.0 {
            config.min_age_days
        } else {
            InputConfig::default().min_age_days
        };

        let max_age = if config.max_age_days.is_finite() && config.max_age_days >= min_age {
            config.max_age_days
        } else {
            InputConfig::default().max_age_days
        };

        let days_old = match self.days_old {
            Some(days) if days > 0.0 => days.min(max_age),
            _ => 0.0,
        };

        ScoreInput {
            likes: count(self.likes),
            dislikes: count(self.dislikes),
            view_count: count(self.view_count),
            subscribers: count(self.subscribers).max(min_subscribers),
            days_old,
            age_days: days_old.max(min_age),
            title: self.title.clone().unwrap_or_default(),
        }
    }
}

fn count(value: Option<i64>) -> u64 {
    value.map(|v| v.max(0) as u64).unwrap_or(0)
}
