//! Stage 5: consistency validation. Pure cross-check over the earlier
//! stage outputs — no model call, so it cannot fault.

use tracing::debug;

use vigil_core::config::PipelineConfig;
use vigil_core::models::{
    Scenario, TrendAnalysis, TrendClassification, ValidationReport, ValidationStatus,
};

/// Cross-check trend classification, forecast direction, and scenario
/// probabilities; derive the overall confidence score.
pub fn run(
    config: &PipelineConfig,
    trend: &TrendAnalysis,
    scenarios: &[Scenario],
    retrieval_hits: usize,
    messages: &mut Vec<String>,
) -> ValidationReport {
    let issues = collect_issues(trend, scenarios);
    let overall_confidence = confidence(config, issues.len(), retrieval_hits);

    let status = if issues.is_empty() {
        ValidationStatus::Valid
    } else if issues.len() < config.invalid_issue_threshold {
        ValidationStatus::Flagged
    } else {
        ValidationStatus::Invalid
    };

    debug!(
        status = status.as_str(),
        issues = issues.len(),
        confidence = overall_confidence,
        "validation stage complete"
    );
    messages.push(format!(
        "consistency check: {} with {} issue(s)",
        status.as_str(),
        issues.len()
    ));

    ValidationReport {
        status,
        issues,
        overall_confidence,
    }
}

fn collect_issues(trend: &TrendAnalysis, scenarios: &[Scenario]) -> Vec<String> {
    let mut issues = Vec::new();
    let forecast = &trend.forecast_7_days;
    let max_risk = scenarios
        .iter()
        .map(|s| s.pessimistic.risk_probability)
        .max()
        .unwrap_or(0);

    match trend.classification {
        TrendClassification::Escalating => {
            if max_risk < 20 {
                issues.push(
                    "escalating trend but every scenario reports near-zero risk".to_string(),
                );
            }
            if forecast.armed_clash_likelihood < 30 {
                issues.push(
                    "escalating classification contradicts a low armed-clash forecast"
                        .to_string(),
                );
            }
        }
        TrendClassification::Stable => {
            if forecast.armed_clash_likelihood > 75 {
                issues.push(
                    "stable classification contradicts a high armed-clash forecast".to_string(),
                );
            }
        }
        TrendClassification::DeEscalating => {
            if forecast.armed_clash_likelihood > 70 {
                issues.push(
                    "de-escalating classification contradicts a high armed-clash forecast"
                        .to_string(),
                );
            }
            if max_risk > 80 {
                issues.push(
                    "de-escalating trend but a scenario reports very high risk".to_string(),
                );
            }
        }
    }

    if scenarios.is_empty() {
        issues.push("no scenarios were generated".to_string());
    }

    issues
}

/// Agreement across stages, scaled by retrieval corroboration, clamped to
/// [0, 1]. Zero retrieved events cap the score at the configured ceiling.
fn confidence(config: &PipelineConfig, issue_count: usize, retrieval_hits: usize) -> f64 {
    let agreement = (1.0 - config.issue_penalty * issue_count as f64).max(0.0);
    let corroboration = (config.zero_retrieval_cap
        + config.corroboration_gain * retrieval_hits as f64)
        .min(1.0);
    (agreement * corroboration).clamp(0.0, 1.0)
}
