use serde::{Deserialize, Serialize};

use crate::constants;

/// AnalysisPipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Nearest-neighbor bound for the retrieval stage.
    pub retrieval_top_k: usize,
    /// Confidence penalty per consistency issue.
    pub issue_penalty: f64,
    /// Confidence cap when retrieval returned zero events.
    pub zero_retrieval_cap: f64,
    /// Confidence gain per corroborating retrieved event.
    pub corroboration_gain: f64,
    /// Issue count at or above which a run is marked INVALID.
    pub invalid_issue_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retrieval_top_k: constants::DEFAULT_TOP_K,
            issue_penalty: constants::ISSUE_CONFIDENCE_PENALTY,
            zero_retrieval_cap: constants::ZERO_RETRIEVAL_CONFIDENCE_CAP,
            corroboration_gain: constants::CORROBORATION_GAIN_PER_EVENT,
            invalid_issue_threshold: constants::INVALID_ISSUE_THRESHOLD,
        }
    }
}
