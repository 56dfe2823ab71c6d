use serde::{Deserialize, Serialize};

use crate::clamp01;

const EMOJI_RANGES: [(u32, u32); 5] = [
    (0x1F600, 0x1F9FF),
    (0x2600, 0x26FF),
    (0x2700, 0x27BF),
    (0x1F300, 0x1F5FF),
    (0x1F680, 0x1F6FF),
];

fn default_keywords() -> Vec<String> {
    [
        "you won't believe",
        "insane",
        "shocking",
        "no way",
        "mind blown",
        "gone wrong",
        "not clickbait",
        "i tried",
        "challenge",
        "prank",
        "hack",
        "exposed",
        "destroyed",
        "impossible",
        "unbelievable",
        "secret",
        "they don't want you",
        "finally revealed",
        "truth about",
        "you need to see",
        "will shock you",
        "can't believe",
        "never expected",
    ]
    .iter()
    .map(|word| word.to_string())
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickbaitConfig {
    pub caps_threshold: f64,
    pub caps_min_letters: usize,
    pub caps_penalty: f64,
    pub keyword_penalty: f64,
    pub keyword_cap: f64,
    pub emoji_threshold: usize,
    pub emoji_penalty: f64,
    pub keywords: Vec<String>,
}

impl Default for ClickbaitConfig {
    fn default() -> Self {
        Self {
            caps_threshold: 0.5,
            caps_min_letters: 3,
            caps_penalty: 0.4,
            keyword_penalty: 0.2,
            keyword_cap: 0.4,
            emoji_threshold: 3,
            emoji_penalty: 0.2,
            keywords: default_keywords(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickbaitSignals {
    pub letters: usize,
    pub uppercase_ratio: f64,
    pub caps_triggered: bool,
    pub keyword_hits: Vec<String>,
    pub emoji_count: usize,
    pub emoji_triggered: bool,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct ClickbaitDetector {
    config: ClickbaitConfig,
    keywords: Vec<String>,
}

impl ClickbaitDetector {
    pub fn new(config: ClickbaitConfig) -> Self {
        let keywords = config
            .keywords
            .iter()
            .map(|word| word.to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self { config, keywords }
    }

    pub fn score(&self, title: &str) -> f64 {
        self.signals(title).score
    }

    pub fn signals(&self, title: &str) -> ClickbaitSignals {
        if title.is_empty() {
            return ClickbaitSignals::default();
        }

        let mut letters = 0usize;
        let mut uppercase = 0usize;
        let mut emoji_count = 0usize;

        for ch in title.chars() {
            if ch.is_ascii_alphabetic() {
                letters += 1;
                if ch.is_ascii_uppercase() {
                    uppercase += 1;
                }
            }
            if is_emoji(ch) {
                emoji_count += 1;
            }
        }

        let uppercase_ratio = if letters == 0 {
            0.0
        } else {
            uppercase as f64 / letters as f64
        };

        let mut total = 0.0;

        let caps_triggered =
            letters > self.config.caps_min_letters && uppercase_ratio > self.config.caps_threshold;
        if caps_triggered {
            total += self.config.caps_penalty;
        }

        let lowercase = title.to_lowercase();
        let keyword_hits: Vec<String> = self
            .keywords
            .iter()
            .filter(|word| lowercase.contains(word.as_str()))
            .cloned()
            .collect();
        total += (keyword_hits.len() as f64 * self.config.keyword_penalty).min(self.config.keyword_cap);

        let emoji_triggered = emoji_count >= self.config.emoji_threshold;
        if emoji_triggered {
            total += self.config.emoji_penalty;
        }

        ClickbaitSignals {
            letters,
            uppercase_ratio,
            caps_triggered,
            keyword_hits,
            emoji_count,
            emoji_triggered,
            score: clamp01(total),
        }
    }
}

fn is_emoji(ch: char) -> bool {
    let code = ch as u32;
    EMOJI_RANGES
        .iter()
        .any(|(start, end)| code >= *start && code <= *end)
}
