use serde::{Deserialize, Serialize};

/// Direction of the conflict trend for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendClassification {
    #[serde(rename = "ESCALATING")]
    Escalating,
    #[serde(rename = "STABLE")]
    Stable,
    #[serde(rename = "DE-ESCALATING")]
    DeEscalating,
}

impl TrendClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Escalating => "ESCALATING",
            Self::Stable => "STABLE",
            Self::DeEscalating => "DE-ESCALATING",
        }
    }
}

/// 7-day-horizon forecast.
///
/// Likelihoods are integers 0–100: the operational scale the run ledger
/// stores and the dashboard displays. Deliberately distinct from the
/// 0–1 float used for the internal confidence score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub armed_clash_likelihood: u8,
    pub civilian_targeting_likelihood: u8,
}

impl Forecast {
    /// Clamp both likelihoods into 0–100.
    pub fn clamped(self) -> Self {
        Self {
            armed_clash_likelihood: self.armed_clash_likelihood.min(100),
            civilian_targeting_likelihood: self.civilian_targeting_likelihood.min(100),
        }
    }
}

/// Trend analysis stage output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub classification: TrendClassification,
    /// Qualitative confidence label ("low", "medium", "high").
    pub confidence_label: String,
    /// Short human-readable drivers behind the classification.
    pub drivers: Vec<String>,
    #[serde(rename = "forecast7Days")]
    pub forecast_7_days: Forecast,
}
