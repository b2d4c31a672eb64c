//! # vigil-ledger
//!
//! RunLedger: the durable record of completed analysis runs.
//!
//! Persistence is best-effort by contract: `record` absorbs its own
//! errors so an unreachable ledger never fails an otherwise successful
//! analysis. Reads (`list`, `get`) and feedback capture propagate, because
//! for those operations storage is the whole point of the call.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod summary;

pub use engine::RunLedger;

use vigil_core::errors::{StorageError, VigilError};

/// Wrap a backend message into the storage error taxonomy.
pub(crate) fn to_storage_err(message: impl Into<String>) -> VigilError {
    VigilError::Storage(StorageError::SqliteError {
        message: message.into(),
    })
}
