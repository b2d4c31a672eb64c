//! Scenario reductions computed at persistence time.

use vigil_core::models::Scenario;

/// Distinct recommendation labels, sorted and ", "-joined. `None` when no
/// scenario carries a recommendation.
pub fn recommendation_summary(scenarios: &[Scenario]) -> Option<String> {
    let mut labels: Vec<&str> = scenarios
        .iter()
        .map(|s| s.recommendation.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    labels.sort_unstable();
    labels.dedup();
    if labels.is_empty() {
        None
    } else {
        Some(labels.join(", "))
    }
}

/// Highest optimistic success probability across scenarios.
pub fn max_success_probability(scenarios: &[Scenario]) -> Option<u8> {
    scenarios
        .iter()
        .map(|s| s.optimistic.success_probability)
        .max()
}

/// Highest pessimistic risk probability across scenarios.
pub fn max_risk_probability(scenarios: &[Scenario]) -> Option<u8> {
    scenarios.iter().map(|s| s.pessimistic.risk_probability).max()
}
