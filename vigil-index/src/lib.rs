//! # vigil-index
//!
//! EventIndex: durable nearest-neighbor retrieval over embedded event text.
//!
//! Every operation on the hot request path (`add_event`, `semantic_search`,
//! `count`) absorbs its own errors and returns a neutral value. Only the
//! one-time `ensure_collection` provisioning call is allowed to fail the
//! caller, because it only runs at process start.

pub mod engine;
pub mod providers;
mod store;

pub use engine::EventIndex;
pub use providers::HashingEncoder;

use vigil_core::errors::{IndexError, VigilError};

/// Wrap a backend message into the index error taxonomy.
pub(crate) fn to_index_err(message: impl Into<String>) -> VigilError {
    VigilError::Index(IndexError::Backend {
        message: message.into(),
    })
}
