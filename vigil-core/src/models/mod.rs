//! Stage contracts and durable record shapes.

mod analysis;
mod event;
mod run;
mod scenario;
mod trend;
mod validation;

pub use analysis::{AnalysisRequest, AnalysisResult};
pub use event::{ExtractedEvent, ExtractedEvents, ScoredEvent};
pub use run::{derive_approval_status, AnalysisRun, Feedback, FeedbackAck};
pub use scenario::{OptimisticBranch, PessimisticBranch, Scenario};
pub use trend::{Forecast, TrendAnalysis, TrendClassification};
pub use validation::{ValidationReport, ValidationStatus};
