//! Intelligence endpoint handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use vigil_core::models::{
    derive_approval_status, AnalysisRequest, AnalysisResult, AnalysisRun, ExtractedEvents,
    Feedback, FeedbackAck, Scenario, TrendAnalysis, ValidationReport,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Wire shape of one completed analysis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// `null` when the ledger was unreachable; the analysis still stands.
    pub run_id: Option<i64>,
    pub region: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<ExtractedEvents>,
    pub trends: TrendAnalysis,
    pub scenarios: Vec<Scenario>,
    pub validation: ValidationReport,
    pub approval_status: String,
    pub confidence: f64,
    pub messages: Vec<String>,
    pub explainability: Option<Value>,
}

impl AnalyzeResponse {
    fn from_result(result: AnalysisResult, run_id: Option<i64>) -> Self {
        let confidence = result.overall_confidence();
        Self {
            run_id,
            region: result.region,
            timestamp: result.timestamp,
            events: result.extracted_events,
            trends: result.trend_analysis,
            scenarios: result.scenarios,
            validation: result.validation,
            approval_status: derive_approval_status(confidence).to_string(),
            confidence,
            messages: result.messages,
            explainability: result.explainability,
        }
    }
}

/// POST /api/intelligence/analyze
///
/// Runs the full pipeline, then records the run best-effort. The pipeline
/// is synchronous by design, so it moves off the async runtime onto a
/// blocking thread, bounded by the configured deadline.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let pipeline = Arc::clone(&state.pipeline);
    let ledger = Arc::clone(&state.ledger);
    let deadline = std::time::Instant::now() + state.request_timeout;

    let work = tokio::task::spawn_blocking(move || {
        let mut result = pipeline.run(&request)?;
        // A blocking task outlives its abandoned handler; past the deadline
        // the caller already got a timeout, so never record a run they
        // never saw.
        let run_id = if std::time::Instant::now() < deadline {
            ledger.record(&mut result)
        } else {
            None
        };
        Ok::<_, vigil_core::errors::VigilError>((result, run_id))
    });

    let (result, run_id) = tokio::time::timeout(state.request_timeout, work)
        .await
        .map_err(|_| ApiError::Timeout)?
        .map_err(|e| {
            ApiError::Internal(vigil_core::errors::VigilError::Pipeline(
                vigil_core::errors::PipelineError::Stage {
                    stage: "dispatch",
                    reason: e.to_string(),
                },
            ))
        })??;

    info!(region = %result.region, run_id = ?run_id, "analysis served");
    Ok(Json(AnalyzeResponse::from_result(result, run_id)))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

/// GET /api/intelligence/runs
pub async fn list_runs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<AnalysisRun>>, ApiError> {
    let runs = state.ledger.list(params.limit)?;
    Ok(Json(runs))
}

/// GET /api/intelligence/runs/{id}
pub async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AnalysisRun>, ApiError> {
    state
        .ledger
        .get(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("run {id}")))
}

/// POST /api/intelligence/runs/{id}/feedback
pub async fn post_feedback(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(feedback): Json<Feedback>,
) -> Result<Json<FeedbackAck>, ApiError> {
    state
        .ledger
        .attach_feedback(id, &feedback)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("run {id}")))
}

/// GET /api/intelligence/health
///
/// Liveness only: no storage or pipeline probes, so it stays truthful
/// under partial degradation.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "intelligence" }))
}

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "vigil",
        "endpoints": [
            "POST /api/intelligence/analyze",
            "GET /api/intelligence/runs",
            "GET /api/intelligence/runs/{id}",
            "POST /api/intelligence/runs/{id}/feedback",
            "GET /api/intelligence/health",
        ],
    }))
}
