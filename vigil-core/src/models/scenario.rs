use serde::{Deserialize, Serialize};

/// Optimistic outcome branch of a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimisticBranch {
    /// Integer 0–100.
    pub success_probability: u8,
    pub narrative: String,
}

/// Pessimistic outcome branch of a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PessimisticBranch {
    /// Integer 0–100.
    pub risk_probability: u8,
    pub narrative: String,
}

/// One candidate intervention paired with both outcome branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub intervention: String,
    pub recommendation: String,
    pub optimistic: OptimisticBranch,
    pub pessimistic: PessimisticBranch,
}

impl Scenario {
    /// Clamp both branch probabilities into 0–100.
    pub fn clamped(mut self) -> Self {
        self.optimistic.success_probability = self.optimistic.success_probability.min(100);
        self.pessimistic.risk_probability = self.pessimistic.risk_probability.min(100);
        self
    }
}
