//! AnalysisPipeline — runs the fixed stage sequence and assembles the
//! immutable `AnalysisResult`.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use vigil_core::config::PipelineConfig;
use vigil_core::errors::{PipelineError, VigilError, VigilResult};
use vigil_core::models::{AnalysisRequest, AnalysisResult};
use vigil_core::traits::IAnalysisModel;
use vigil_index::EventIndex;

use crate::explain;
use crate::messages::dedupe_messages;
use crate::stages;

/// The pipeline orchestrator. Owns no persistent state; all concurrency
/// safety is delegated to the index and ledger backends.
pub struct AnalysisPipeline {
    index: Arc<EventIndex>,
    model: Arc<dyn IAnalysisModel>,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(
        index: Arc<EventIndex>,
        model: Arc<dyn IAnalysisModel>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            index,
            model,
            config,
        }
    }

    /// Execute all stages for one request.
    ///
    /// Any stage fault aborts the run — no partial result is ever
    /// returned. Soft degradations only add warnings to the message log.
    pub fn run(&self, request: &AnalysisRequest) -> VigilResult<AnalysisResult> {
        if request.region.trim().is_empty() {
            return Err(VigilError::Pipeline(PipelineError::InvalidRequest {
                reason: "region must be non-empty".to_string(),
            }));
        }

        let timestamp = Utc::now();
        let mut messages: Vec<String> = Vec::new();

        info!(region = %request.region, model = self.model.name(), "analysis started");

        // Stage 1: retrieval. Always executes; soft on failure.
        let retrieved = stages::retrieval::run(
            &self.index,
            request,
            self.config.retrieval_top_k,
            &mut messages,
        );

        // Stage 2: extraction. Only when raw text was supplied.
        let extracted = if request.has_raw_data() {
            Some(stages::extraction::run(
                self.model.as_ref(),
                request,
                &mut messages,
            )?)
        } else {
            None
        };

        // Stage 3: trend analysis.
        let trend = stages::trend::run(
            self.model.as_ref(),
            &request.region,
            &retrieved,
            extracted.as_ref(),
            &mut messages,
        )?;

        // Stage 4: scenario generation.
        let scenarios = stages::scenario::run(
            self.model.as_ref(),
            &request.region,
            &trend,
            &request.interventions,
            &mut messages,
        )?;

        // Stage 5: consistency validation.
        let validation = stages::validation::run(
            &self.config,
            &trend,
            &scenarios,
            retrieved.len(),
            &mut messages,
        );
        let confidence_score = validation.overall_confidence;

        // Stage 6: assembly.
        let explainability = explain::build(
            request,
            &retrieved,
            extracted.as_ref(),
            &trend,
            &scenarios,
            &validation,
            confidence_score,
            timestamp,
        );

        info!(
            region = %request.region,
            status = validation.status.as_str(),
            confidence = confidence_score,
            "analysis complete"
        );

        Ok(AnalysisResult {
            region: request.region.clone(),
            timestamp,
            has_raw_data: request.has_raw_data(),
            interventions: request.interventions.clone(),
            extracted_events: extracted,
            retrieved_events: retrieved,
            trend_analysis: trend,
            scenarios,
            validation,
            confidence_score,
            messages: dedupe_messages(messages),
            explainability: Some(explainability),
        })
    }
}
