//! Signed feature-hashing encoder over unigrams and bigrams.
//!
//! Buckets and signs come from blake3, the same hash the store keys on,
//! so the mapping is stable across processes. Conflict-salient vocabulary
//! is upweighted so domain terms dominate generic reporting language, and
//! adjacent-token bigrams keep phrase context ("armed clash" is not
//! "clash armed"). No external services; deterministic for identical
//! input, which the index relies on for stable retrieval.

use vigil_core::errors::VigilResult;
use vigil_core::traits::IEventEncoder;

/// Vocabulary that carries most of the retrieval signal in conflict
/// reporting. Weighted above filler terms at encode time.
const SALIENT_TERMS: &[&str] = &[
    "clash",
    "clashes",
    "attack",
    "attacks",
    "shelling",
    "offensive",
    "raid",
    "ambush",
    "bombardment",
    "ceasefire",
    "truce",
    "withdrawal",
    "negotiation",
    "mediation",
    "displacement",
    "casualties",
];

const SALIENT_WEIGHT: f32 = 2.0;
const BIGRAM_WEIGHT: f32 = 0.5;
const MIN_TERM_LEN: usize = 3;

/// Deterministic dense-vector encoder over signed hashed features.
pub struct HashingEncoder {
    dimensions: usize,
}

impl HashingEncoder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Map one feature to a bucket and a sign. The sign bit spreads bucket
    /// collisions so unrelated features tend to cancel instead of piling up.
    fn feature_slot(&self, feature: &str) -> (usize, f32) {
        let digest = blake3::hash(feature.as_bytes());
        let b = digest.as_bytes();
        let bucket = u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
            as usize
            % self.dimensions;
        let sign = if b[8] & 1 == 0 { 1.0 } else { -1.0 };
        (bucket, sign)
    }

    /// Lowercase alphanumeric terms, dropping anything shorter than three
    /// characters (articles, prepositions, stray digits).
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() >= MIN_TERM_LEN)
            .map(str::to_lowercase)
            .collect()
    }

    fn term_weight(term: &str) -> f32 {
        if SALIENT_TERMS.contains(&term) {
            SALIENT_WEIGHT
        } else {
            1.0
        }
    }

    fn accumulate(&self, vec: &mut [f32], feature: &str, weight: f32) {
        let (bucket, sign) = self.feature_slot(feature);
        vec[bucket] += sign * weight;
    }

    fn feature_vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        for token in &tokens {
            self.accumulate(&mut vec, token, Self::term_weight(token));
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            self.accumulate(&mut vec, &bigram, BIGRAM_WEIGHT);
        }

        l2_normalize(&mut vec);
        vec
    }
}

fn l2_normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in vec.iter_mut() {
            *v /= norm;
        }
    }
}

impl IEventEncoder for HashingEncoder {
    fn encode(&self, text: &str) -> VigilResult<Vec<f32>> {
        Ok(self.feature_vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "signed-hashing"
    }

    fn is_available(&self) -> bool {
        true // No external dependencies.
    }
}
