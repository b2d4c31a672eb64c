//! # vigil-server
//!
//! IntelligenceService: the HTTP boundary. Thin by contract — request
//! decode, pipeline dispatch, best-effort ledger record, response encode.
//! All analysis semantics live in the pipeline; all persistence semantics
//! live in the ledger.

pub mod error;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
