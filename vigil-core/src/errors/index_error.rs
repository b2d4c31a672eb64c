/// EventIndex errors. Only `Provisioning` is ever allowed to reach a
/// caller; the rest are absorbed at the index boundary.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("collection provisioning failed: {reason}")]
    Provisioning { reason: String },

    #[error("dimension mismatch: collection has {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("index backend error: {message}")]
    Backend { message: String },
}
