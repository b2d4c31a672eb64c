//! Stage 2: extraction. Runs only when raw text was supplied; an
//! extraction fault is fatal to the request.

use tracing::debug;

use vigil_core::errors::{PipelineError, VigilError, VigilResult};
use vigil_core::models::{AnalysisRequest, ExtractedEvents};
use vigil_core::traits::IAnalysisModel;

/// Convert raw text into structured event candidates.
pub fn run(
    model: &dyn IAnalysisModel,
    request: &AnalysisRequest,
    messages: &mut Vec<String>,
) -> VigilResult<ExtractedEvents> {
    let raw = request.raw_data.as_deref().unwrap_or_default();
    let extracted = model.extract_events(&request.region, raw).map_err(|e| {
        VigilError::Pipeline(PipelineError::Stage {
            stage: "extraction",
            reason: e.to_string(),
        })
    })?;

    debug!(
        region = %request.region,
        events = extracted.events.len(),
        "extraction stage complete"
    );
    messages.push(extracted.summary.clone());
    Ok(extracted)
}
