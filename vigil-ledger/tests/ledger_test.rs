//! RunLedger integration tests against a temp-file database.

use chrono::Utc;
use serde_json::json;
use tempfile::TempDir;

use vigil_core::models::{
    AnalysisResult, Feedback, Forecast, OptimisticBranch, PessimisticBranch, Scenario,
    TrendAnalysis, TrendClassification, ValidationReport, ValidationStatus,
};
use vigil_ledger::{engine::PERSISTENCE_WARNING, RunLedger};

fn open_ledger() -> (TempDir, RunLedger) {
    let dir = TempDir::new().expect("tempdir");
    let ledger = RunLedger::open(&dir.path().join("ledger.db")).expect("open ledger");
    (dir, ledger)
}

fn sample_result(region: &str, confidence: f64) -> AnalysisResult {
    AnalysisResult {
        region: region.to_string(),
        timestamp: Utc::now(),
        has_raw_data: false,
        interventions: vec!["Ceasefire monitoring".to_string()],
        extracted_events: None,
        retrieved_events: Vec::new(),
        trend_analysis: TrendAnalysis {
            classification: TrendClassification::Escalating,
            confidence_label: "medium".to_string(),
            drivers: vec!["5 corroborating event(s)".to_string()],
            forecast_7_days: Forecast {
                armed_clash_likelihood: 70,
                civilian_targeting_likelihood: 56,
            },
        },
        scenarios: vec![Scenario {
            intervention: "Ceasefire monitoring".to_string(),
            recommendation: "Deploy de-escalation support".to_string(),
            optimistic: OptimisticBranch {
                success_probability: 40,
                narrative: "conditions improve".to_string(),
            },
            pessimistic: PessimisticBranch {
                risk_probability: 70,
                narrative: "armed activity continues".to_string(),
            },
        }],
        validation: ValidationReport {
            status: ValidationStatus::Valid,
            issues: Vec::new(),
            overall_confidence: confidence,
        },
        confidence_score: confidence,
        messages: vec!["retrieved 5 related event(s)".to_string()],
        explainability: Some(json!({"meta": {"pipelineConfidenceScore": confidence}})),
    }
}

#[test]
fn record_then_get_round_trips_the_projection() {
    let (_dir, ledger) = open_ledger();

    let mut result = sample_result("Khartoum", 0.85);
    let id = ledger.record(&mut result).expect("record");
    assert!(id > 0);

    let run = ledger.get(id).expect("get").expect("run exists");
    assert_eq!(run.region, "Khartoum");
    assert_eq!(run.interventions, vec!["Ceasefire monitoring".to_string()]);
    assert_eq!(run.trend_classification.as_deref(), Some("ESCALATING"));
    assert_eq!(run.forecast_armed_clash, Some(70));
    assert_eq!(
        run.recommendation_summary.as_deref(),
        Some("Deploy de-escalation support")
    );
    assert_eq!(run.max_success_probability, Some(40));
    assert_eq!(run.max_risk_probability, Some(70));
    assert_eq!(run.validation_status.as_deref(), Some("VALID"));
    assert_eq!(run.issue_count, 0);
    assert_eq!(run.approval_status.as_deref(), Some("auto-approved"));
    assert!(run.human_feedback.is_none());
    assert!(run.explainability.is_some());
}

#[test]
fn low_confidence_runs_read_back_pending() {
    let (_dir, ledger) = open_ledger();
    let mut result = sample_result("Khartoum", 0.4);
    let id = ledger.record(&mut result).expect("record");

    let run = ledger.get(id).expect("get").expect("run exists");
    assert_eq!(run.approval_status.as_deref(), Some("pending"));
}

#[test]
fn list_is_newest_first_and_clamped() {
    let (_dir, ledger) = open_ledger();
    let mut last_id = 0;
    for i in 0..5 {
        let mut result = sample_result(&format!("Region-{i}"), 0.5);
        last_id = ledger.record(&mut result).expect("record");
    }

    let runs = ledger.list(Some(3)).expect("list");
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].id, last_id);
    assert!(runs.windows(2).all(|w| w[0].id > w[1].id));

    // Out-of-range limits clamp instead of erroring.
    assert_eq!(ledger.list(Some(0)).expect("list").len(), 1);
    assert!(ledger.list(Some(10_000)).expect("list").len() <= 100);
}

#[test]
fn record_swallows_failure_and_appends_warning() {
    let (_dir, ledger) = open_ledger();
    ledger
        .pool()
        .writer
        .with_conn(|conn| {
            conn.execute_batch("DROP TABLE analysis_runs")
                .map_err(|e| vigil_core::errors::VigilError::Storage(
                    vigil_core::errors::StorageError::SqliteError { message: e.to_string() },
                ))
        })
        .expect("drop table");

    let mut result = sample_result("Khartoum", 0.85);
    assert!(ledger.record(&mut result).is_none());
    assert!(result.messages.iter().any(|m| m == PERSISTENCE_WARNING));

    // Reads are not best-effort: a broken ledger propagates.
    assert!(ledger.list(None).is_err());
    assert!(ledger.get(1).is_err());
}

#[test]
fn feedback_appends_to_audit_trail_without_mutating_the_run() {
    let (_dir, ledger) = open_ledger();
    let mut result = sample_result("Khartoum", 0.85);
    let id = ledger.record(&mut result).expect("record");

    assert!(ledger
        .attach_feedback(id + 999, &Feedback { approved: true, comment: None })
        .expect("attach")
        .is_none());

    let ack = ledger
        .attach_feedback(
            id,
            &Feedback {
                approved: false,
                comment: Some("overstates risk".to_string()),
            },
        )
        .expect("attach")
        .expect("run exists");
    assert_eq!(ack.run_id, id);
    assert_eq!(ack.status, "rejected");

    let ack = ledger
        .attach_feedback(
            id,
            &Feedback {
                approved: true,
                comment: Some("revised, looks right".to_string()),
            },
        )
        .expect("attach")
        .expect("run exists");
    assert_eq!(ack.status, "approved");

    let run = ledger.get(id).expect("get").expect("run exists");
    assert_eq!(run.human_feedback.as_deref(), Some("revised, looks right"));
    // The projection itself is untouched by feedback.
    assert_eq!(run.overall_confidence, 0.85);
    assert_eq!(run.approval_status.as_deref(), Some("auto-approved"));
}
