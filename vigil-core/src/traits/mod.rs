//! Trait seams between subsystems.

mod encoder;
mod model;

pub use encoder::IEventEncoder;
pub use model::IAnalysisModel;
