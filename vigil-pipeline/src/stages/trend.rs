//! Stage 3: trend analysis. Fatal on model fault; forecast likelihoods
//! are clamped into 0–100 regardless of what the model produced.

use tracing::debug;

use vigil_core::errors::{PipelineError, VigilError, VigilResult};
use vigil_core::models::{ExtractedEvents, ScoredEvent, TrendAnalysis};
use vigil_core::traits::IAnalysisModel;

pub fn run(
    model: &dyn IAnalysisModel,
    region: &str,
    retrieved: &[ScoredEvent],
    extracted: Option<&ExtractedEvents>,
    messages: &mut Vec<String>,
) -> VigilResult<TrendAnalysis> {
    let mut trend = model
        .analyze_trend(region, retrieved, extracted)
        .map_err(|e| {
            VigilError::Pipeline(PipelineError::Stage {
                stage: "trend",
                reason: e.to_string(),
            })
        })?;

    trend.forecast_7_days = trend.forecast_7_days.clamped();

    debug!(
        region = %region,
        classification = trend.classification.as_str(),
        "trend stage complete"
    );
    messages.push(format!(
        "trend classified as {} ({} confidence)",
        trend.classification.as_str(),
        trend.confidence_label
    ));
    Ok(trend)
}
