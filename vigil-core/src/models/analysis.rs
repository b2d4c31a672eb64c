use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ExtractedEvents, Scenario, ScoredEvent, TrendAnalysis, ValidationReport};

/// Input to one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub region: String,
    /// Optional raw text report; enables the extraction stage.
    #[serde(default)]
    pub raw_data: Option<String>,
    /// Candidate interventions; empty means a single status-quo scenario.
    #[serde(default)]
    pub interventions: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            raw_data: None,
            interventions: Vec::new(),
        }
    }

    /// Whether non-empty raw text was supplied.
    pub fn has_raw_data(&self) -> bool {
        self.raw_data
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }
}

/// The pipeline's aggregate output for one request.
///
/// Constructed once at assembly, immutable afterwards except for the
/// ledger appending a persistence warning to `messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub region: String,
    /// Assigned at the start of pipeline execution.
    pub timestamp: DateTime<Utc>,
    pub has_raw_data: bool,
    pub interventions: Vec<String>,
    /// Present only when raw text was supplied.
    pub extracted_events: Option<ExtractedEvents>,
    /// Raw retrieval hits, kept for explainability. Not persisted.
    pub retrieved_events: Vec<ScoredEvent>,
    pub trend_analysis: TrendAnalysis,
    pub scenarios: Vec<Scenario>,
    pub validation: ValidationReport,
    /// Pipeline-level confidence, the fallback when validation carries none.
    pub confidence_score: f64,
    /// Human-readable notes accumulated during the run, including
    /// soft-failure warnings. Deduplicated order-preserving at assembly.
    pub messages: Vec<String>,
    /// Structured rationale snapshot.
    pub explainability: Option<serde_json::Value>,
}

impl AnalysisResult {
    /// The confidence value fed to persistence: validation's score when it
    /// is meaningful, else the pipeline-level score, else 0.0. Always set.
    pub fn overall_confidence(&self) -> f64 {
        let v = self.validation.overall_confidence;
        if v.is_finite() && v > 0.0 {
            v
        } else if self.confidence_score.is_finite() {
            self.confidence_score
        } else {
            0.0
        }
    }
}
