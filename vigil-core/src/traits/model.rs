use crate::errors::VigilResult;
use crate::models::{ExtractedEvents, Scenario, ScoredEvent, TrendAnalysis};

/// Generative analysis capability consumed by the pipeline stages.
///
/// Treated as a pluggable black box: each method takes a typed,
/// prompt-shaped input and returns a typed, structured output. Any error
/// here is a pipeline-stage fault and aborts the whole run.
pub trait IAnalysisModel: Send + Sync {
    /// Convert raw text into structured event candidates.
    fn extract_events(&self, region: &str, raw_text: &str) -> VigilResult<ExtractedEvents>;

    /// Classify the trend and produce a 7-day forecast from retrieval
    /// context (plus extraction output when present).
    fn analyze_trend(
        &self,
        region: &str,
        retrieved: &[ScoredEvent],
        extracted: Option<&ExtractedEvents>,
    ) -> VigilResult<TrendAnalysis>;

    /// Produce one scenario for a candidate intervention.
    fn generate_scenario(
        &self,
        region: &str,
        trend: &TrendAnalysis,
        intervention: &str,
    ) -> VigilResult<Scenario>;

    /// Human-readable model name.
    fn name(&self) -> &str;
}
