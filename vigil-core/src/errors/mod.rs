//! Error taxonomy for the Vigil workspace.
//!
//! Each subsystem has its own `thiserror` enum; `VigilError` composes them
//! so callers can match on the boundary a fault crossed. Soft boundaries
//! (index reads, ledger writes) absorb these internally and return neutral
//! values; everything else propagates as `VigilResult`.

mod index_error;
mod pipeline_error;
mod storage_error;

pub use index_error::IndexError;
pub use pipeline_error::PipelineError;
pub use storage_error::StorageError;

/// Top-level error for the Vigil workspace.
#[derive(Debug, thiserror::Error)]
pub enum VigilError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Convenience result alias used across the workspace.
pub type VigilResult<T> = Result<T, VigilError>;
