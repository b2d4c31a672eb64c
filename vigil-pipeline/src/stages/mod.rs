//! The fixed stage sequence. Each stage is a small, testable function;
//! the engine owns ordering and the message log.

pub mod extraction;
pub mod retrieval;
pub mod scenario;
pub mod trend;
pub mod validation;
