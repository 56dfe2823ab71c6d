use serde::{Deserialize, Serialize};

use crate::{clamp01, ScoreInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    pub high_breakpoint: f64,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            high_breakpoint: 10_000.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VolumeEstimator {
    config: VolumeConfig,
}

impl VolumeEstimator {
    pub fn new(config: VolumeConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, input: &ScoreInput) -> f64 {
        let reference = (1.0 + self.config.high_breakpoint.max(0.0)).ln();
        if reference <= 0.0 {
            return 0.0;
        }
        clamp01((1.0 + input.likes as f64).ln() / reference)
    }
}
