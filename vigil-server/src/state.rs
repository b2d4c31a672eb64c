//! Shared handler state.

use std::sync::Arc;
use std::time::Duration;

use vigil_ledger::RunLedger;
use vigil_pipeline::AnalysisPipeline;

/// State shared by all handlers. Cheap to clone; the heavy members sit
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub ledger: Arc<RunLedger>,
    /// Whole-pipeline deadline per analysis request.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        pipeline: Arc<AnalysisPipeline>,
        ledger: Arc<RunLedger>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            pipeline,
            ledger,
            request_timeout,
        }
    }
}
