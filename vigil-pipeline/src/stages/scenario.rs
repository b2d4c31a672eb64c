//! Stage 4: scenario generation. One scenario per candidate intervention;
//! an empty candidate list yields a single status-quo scenario.

use tracing::debug;

use vigil_core::errors::{PipelineError, VigilError, VigilResult};
use vigil_core::models::{Scenario, TrendAnalysis};
use vigil_core::traits::IAnalysisModel;

/// Label used when the caller supplied no interventions.
pub const STATUS_QUO: &str = "Status quo";

pub fn run(
    model: &dyn IAnalysisModel,
    region: &str,
    trend: &TrendAnalysis,
    interventions: &[String],
    messages: &mut Vec<String>,
) -> VigilResult<Vec<Scenario>> {
    let status_quo = [STATUS_QUO.to_string()];
    let candidates: &[String] = if interventions.is_empty() {
        &status_quo
    } else {
        interventions
    };

    let mut scenarios = Vec::with_capacity(candidates.len());
    for intervention in candidates {
        let scenario = model
            .generate_scenario(region, trend, intervention)
            .map_err(|e| {
                VigilError::Pipeline(PipelineError::Stage {
                    stage: "scenario",
                    reason: e.to_string(),
                })
            })?;
        scenarios.push(scenario.clamped());
    }

    debug!(region = %region, scenarios = scenarios.len(), "scenario stage complete");
    messages.push(format!("generated {} scenario(s)", scenarios.len()));
    Ok(scenarios)
}
