//! Explainability snapshot: a small structured summary of what drove the
//! result, attached to the assembled `AnalysisResult`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};

use vigil_core::models::{
    AnalysisRequest, ExtractedEvents, Scenario, ScoredEvent, TrendAnalysis, ValidationReport,
};

/// Build the explainability payload from the final stage outputs.
#[allow(clippy::too_many_arguments)]
pub fn build(
    request: &AnalysisRequest,
    retrieved: &[ScoredEvent],
    extracted: Option<&ExtractedEvents>,
    trend: &TrendAnalysis,
    scenarios: &[Scenario],
    validation: &ValidationReport,
    confidence_score: f64,
    timestamp: DateTime<Utc>,
) -> Value {
    // Retrieval summary: per-source tally and covered time span.
    let mut sources: BTreeMap<String, usize> = BTreeMap::new();
    let mut dates: Vec<NaiveDate> = Vec::new();
    for event in retrieved {
        let source = event
            .metadata
            .get("source")
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN");
        *sources.entry(source.to_string()).or_default() += 1;

        if let Some(date) = event.metadata.get("date").and_then(Value::as_str) {
            if let Some(parsed) = parse_event_date(date) {
                dates.push(parsed);
            }
        }
    }
    let time_span_days = match (dates.iter().min(), dates.iter().max()) {
        (Some(min), Some(max)) => Some((*max - *min).num_days()),
        _ => None,
    };

    let recommendations: Vec<&str> = scenarios
        .iter()
        .map(|s| s.recommendation.as_str())
        .collect();
    let max_success = scenarios
        .iter()
        .map(|s| s.optimistic.success_probability)
        .max();
    let max_risk = scenarios
        .iter()
        .map(|s| s.pessimistic.risk_probability)
        .max();

    json!({
        "input": {
            "region": request.region,
            "hasRawData": request.has_raw_data(),
            "interventionsCount": request.interventions.len(),
            "interventions": request.interventions,
        },
        "retrieval": {
            "totalEventsConsidered": retrieved.len(),
            "sources": sources,
            "timeSpanDays": time_span_days,
        },
        "extraction": extracted.map(|e| json!({
            "eventCount": e.events.len(),
            "summary": e.summary,
        })),
        "trend": {
            "classification": trend.classification.as_str(),
            "confidenceLabel": trend.confidence_label,
            "drivers": trend.drivers,
            "forecast7Days": trend.forecast_7_days,
        },
        "scenarios": {
            "numScenarios": scenarios.len(),
            "recommendations": recommendations,
            "maxSuccessProbability": max_success,
            "maxRiskProbability": max_risk,
        },
        "validation": {
            "status": validation.status.as_str(),
            "issueCount": validation.issues.len(),
            "issues": validation.issues,
            "overallConfidence": validation.overall_confidence,
        },
        "meta": {
            "pipelineConfidenceScore": confidence_score,
            "timestamp": timestamp.to_rfc3339(),
        },
    })
}

/// Accept ISO dates with or without a time component; skip anything else.
fn parse_event_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn hit(source: &str, date: &str) -> ScoredEvent {
        let mut metadata = Map::new();
        metadata.insert("source".into(), json!(source));
        metadata.insert("date".into(), json!(date));
        ScoredEvent {
            event_id: "e".to_string(),
            score: 0.5,
            metadata,
        }
    }

    #[test]
    fn tallies_sources_and_time_span() {
        let retrieved = vec![
            hit("ACLED", "2026-01-01"),
            hit("ACLED", "2026-01-11"),
            hit("GDELT", "2026-01-06"),
        ];
        let request = AnalysisRequest::new("Khartoum");
        let trend = vigil_core::models::TrendAnalysis {
            classification: vigil_core::models::TrendClassification::Stable,
            confidence_label: "low".to_string(),
            drivers: vec![],
            forecast_7_days: vigil_core::models::Forecast {
                armed_clash_likelihood: 10,
                civilian_targeting_likelihood: 10,
            },
        };
        let validation = ValidationReport {
            status: vigil_core::models::ValidationStatus::Valid,
            issues: vec![],
            overall_confidence: 0.6,
        };

        let payload = build(
            &request,
            &retrieved,
            None,
            &trend,
            &[],
            &validation,
            0.6,
            Utc::now(),
        );

        assert_eq!(payload["retrieval"]["totalEventsConsidered"], 3);
        assert_eq!(payload["retrieval"]["sources"]["ACLED"], 2);
        assert_eq!(payload["retrieval"]["timeSpanDays"], 10);
        assert!(payload["extraction"].is_null());
    }

    #[test]
    fn unparseable_dates_are_skipped() {
        let retrieved = vec![hit("ACLED", "last tuesday")];
        let request = AnalysisRequest::new("Khartoum");
        let trend = vigil_core::models::TrendAnalysis {
            classification: vigil_core::models::TrendClassification::Stable,
            confidence_label: "low".to_string(),
            drivers: vec![],
            forecast_7_days: vigil_core::models::Forecast {
                armed_clash_likelihood: 10,
                civilian_targeting_likelihood: 10,
            },
        };
        let validation = ValidationReport {
            status: vigil_core::models::ValidationStatus::Valid,
            issues: vec![],
            overall_confidence: 0.6,
        };
        let payload = build(&request, &retrieved, None, &trend, &[], &validation, 0.6, Utc::now());
        assert!(payload["retrieval"]["timeSpanDays"].is_null());
    }
}
