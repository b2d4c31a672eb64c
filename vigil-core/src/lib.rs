//! # vigil-core
//!
//! Foundation crate for the Vigil conflict-risk intelligence pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{IndexConfig, PipelineConfig, ServerConfig};
pub use errors::{IndexError, PipelineError, StorageError, VigilError, VigilResult};
pub use models::{
    AnalysisRequest, AnalysisResult, AnalysisRun, Feedback, FeedbackAck, Scenario, ScoredEvent,
    TrendAnalysis, TrendClassification, ValidationReport, ValidationStatus,
};
