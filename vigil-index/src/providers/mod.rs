//! Embedding providers.

mod hashing_encoder;

pub use hashing_encoder::HashingEncoder;
