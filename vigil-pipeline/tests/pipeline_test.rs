//! End-to-end pipeline tests against an in-memory event index.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use vigil_core::config::{IndexConfig, PipelineConfig};
use vigil_core::errors::{PipelineError, VigilError, VigilResult};
use vigil_core::models::{
    AnalysisRequest, ExtractedEvents, Scenario, ScoredEvent, TrendAnalysis,
};
use vigil_core::traits::IAnalysisModel;
use vigil_index::{EventIndex, HashingEncoder};
use vigil_pipeline::{AnalysisPipeline, HeuristicModel};

const DIMS: usize = 128;

fn test_index() -> Arc<EventIndex> {
    let config = IndexConfig {
        dimensions: DIMS,
        ..IndexConfig::default()
    };
    let index = EventIndex::open_in_memory(Arc::new(HashingEncoder::new(DIMS)), config)
        .expect("open index");
    index.ensure_collection().expect("provision");
    Arc::new(index)
}

fn seed_khartoum(index: &EventIndex) {
    let events = [
        ("acled-1", "armed clash between factions near the market"),
        ("acled-2", "shelling reported in the industrial district"),
        ("gdelt-1", "offensive launched against the garrison"),
    ];
    for (id, text) in events {
        let mut metadata = Map::new();
        metadata.insert("region".to_string(), json!("Khartoum"));
        metadata.insert("source".to_string(), json!("ACLED"));
        metadata.insert("date".to_string(), json!("2026-08-01"));
        assert!(index.add_event(id, text, &metadata));
    }
}

fn pipeline(index: Arc<EventIndex>) -> AnalysisPipeline {
    AnalysisPipeline::new(index, Arc::new(HeuristicModel::new()), PipelineConfig::default())
}

#[test]
fn full_run_with_raw_text() {
    let index = test_index();
    seed_khartoum(&index);
    let pipeline = pipeline(index);

    let mut request = AnalysisRequest::new("Khartoum");
    request.raw_data = Some("Heavy shelling near the bridge. Another attack reported.".to_string());
    request.interventions = vec!["Ceasefire monitoring".to_string()];

    let result = pipeline.run(&request).expect("pipeline run");

    assert_eq!(result.region, "Khartoum");
    assert!(result.has_raw_data);
    assert!(result.extracted_events.is_some());
    assert!(!result.retrieved_events.is_empty());
    assert_eq!(result.scenarios.len(), 1);
    assert_eq!(result.scenarios[0].intervention, "Ceasefire monitoring");
    assert!((0.0..=1.0).contains(&result.confidence_score));
    assert_eq!(result.confidence_score, result.validation.overall_confidence);
    assert!(result.explainability.is_some());
}

#[test]
fn no_raw_text_skips_extraction() {
    let index = test_index();
    seed_khartoum(&index);
    let pipeline = pipeline(index);

    let result = pipeline
        .run(&AnalysisRequest::new("Khartoum"))
        .expect("pipeline run");

    assert!(!result.has_raw_data);
    assert!(result.extracted_events.is_none());
}

#[test]
fn blank_raw_text_counts_as_absent() {
    let index = test_index();
    let pipeline = pipeline(index);

    let mut request = AnalysisRequest::new("Khartoum");
    request.raw_data = Some("   ".to_string());
    let result = pipeline.run(&request).expect("pipeline run");
    assert!(!result.has_raw_data);
    assert!(result.extracted_events.is_none());
}

#[test]
fn empty_index_degrades_softly() {
    let index = test_index();
    let pipeline = pipeline(index);

    let result = pipeline
        .run(&AnalysisRequest::new("Gezira"))
        .expect("pipeline run");

    assert!(result.retrieved_events.is_empty());
    assert!(result
        .messages
        .iter()
        .any(|m| m.starts_with("warning:")));
    // No corroboration caps confidence.
    assert!(result.confidence_score <= 0.5);
}

#[test]
fn empty_interventions_yield_one_status_quo_scenario() {
    let index = test_index();
    let pipeline = pipeline(index);

    let result = pipeline
        .run(&AnalysisRequest::new("Gezira"))
        .expect("pipeline run");

    assert_eq!(result.scenarios.len(), 1);
    assert_eq!(result.scenarios[0].intervention, "Status quo");
}

#[test]
fn blank_region_is_rejected() {
    let index = test_index();
    let pipeline = pipeline(index);

    let err = pipeline.run(&AnalysisRequest::new("  ")).unwrap_err();
    assert!(matches!(
        err,
        VigilError::Pipeline(PipelineError::InvalidRequest { .. })
    ));
}

#[test]
fn region_filter_excludes_other_regions() {
    let index = test_index();
    seed_khartoum(&index);

    let mut metadata = Map::new();
    metadata.insert("region".to_string(), json!("Gezira"));
    assert!(index.add_event("gezira-1", "ceasefire agreement signed", &metadata));

    let pipeline = pipeline(index);
    let result = pipeline
        .run(&AnalysisRequest::new("Gezira"))
        .expect("pipeline run");

    for event in &result.retrieved_events {
        assert_eq!(
            event.metadata.get("region").and_then(Value::as_str),
            Some("Gezira")
        );
    }
}

#[test]
fn messages_are_deduplicated() {
    let index = test_index();
    seed_khartoum(&index);
    let pipeline = pipeline(index);

    let result = pipeline
        .run(&AnalysisRequest::new("Khartoum"))
        .expect("pipeline run");

    let mut seen = std::collections::HashSet::new();
    for message in &result.messages {
        assert!(seen.insert(message.clone()), "duplicate message: {message}");
    }
}

struct FailingModel;

impl IAnalysisModel for FailingModel {
    fn extract_events(&self, _region: &str, _raw_text: &str) -> VigilResult<ExtractedEvents> {
        Err(VigilError::Pipeline(PipelineError::Stage {
            stage: "extraction",
            reason: "model unavailable".to_string(),
        }))
    }

    fn analyze_trend(
        &self,
        _region: &str,
        _retrieved: &[ScoredEvent],
        _extracted: Option<&ExtractedEvents>,
    ) -> VigilResult<TrendAnalysis> {
        Err(VigilError::Pipeline(PipelineError::Stage {
            stage: "trend",
            reason: "model unavailable".to_string(),
        }))
    }

    fn generate_scenario(
        &self,
        _region: &str,
        _trend: &TrendAnalysis,
        _intervention: &str,
    ) -> VigilResult<Scenario> {
        Err(VigilError::Pipeline(PipelineError::Stage {
            stage: "scenario",
            reason: "model unavailable".to_string(),
        }))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[test]
fn model_fault_aborts_the_run() {
    let index = test_index();
    let pipeline =
        AnalysisPipeline::new(index, Arc::new(FailingModel), PipelineConfig::default());

    let err = pipeline.run(&AnalysisRequest::new("Khartoum")).unwrap_err();
    assert!(matches!(
        err,
        VigilError::Pipeline(PipelineError::Stage { stage: "trend", .. })
    ));
}
