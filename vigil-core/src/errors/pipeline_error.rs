/// Analysis pipeline errors. Any stage error aborts the whole run —
/// an incomplete analysis is never returned.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("stage '{stage}' failed: {reason}")]
    Stage { stage: &'static str, reason: String },

    #[error("analysis timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}
