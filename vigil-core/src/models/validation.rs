use serde::{Deserialize, Serialize};

/// Outcome of the cross-stage consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    #[serde(rename = "VALID")]
    Valid,
    #[serde(rename = "FLAGGED")]
    Flagged,
    #[serde(rename = "INVALID")]
    Invalid,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Flagged => "FLAGGED",
            Self::Invalid => "INVALID",
        }
    }
}

/// Validation stage output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub status: ValidationStatus,
    /// Natural-language descriptions of detected contradictions.
    pub issues: Vec<String>,
    /// Always in [0.0, 1.0].
    pub overall_confidence: f64,
}
