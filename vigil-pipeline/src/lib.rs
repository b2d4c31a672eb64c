//! # vigil-pipeline
//!
//! AnalysisPipeline: produces one `AnalysisResult` from
//! `(region, optional raw text, optional interventions)`.
//!
//! Stage order is fixed: retrieval → extraction → trend → scenarios →
//! validation → assembly. Stage faults abort the whole run; soft
//! degradations (empty retrieval) only append warnings to the message log.

pub mod engine;
pub mod explain;
pub mod messages;
pub mod model;
pub mod stages;

pub use engine::AnalysisPipeline;
pub use model::HeuristicModel;
