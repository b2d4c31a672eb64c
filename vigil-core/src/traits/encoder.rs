use crate::errors::VigilResult;

/// Text-to-embedding encoder.
///
/// Assumed synchronous and deterministic for identical input.
pub trait IEventEncoder: Send + Sync {
    /// Encode a single text into a fixed-length vector.
    fn encode(&self, text: &str) -> VigilResult<Vec<f32>>;

    /// The dimensionality of vectors produced by this encoder.
    fn dimensions(&self) -> usize;

    /// Human-readable encoder name.
    fn name(&self) -> &str;

    /// Whether this encoder is currently available.
    fn is_available(&self) -> bool;
}
