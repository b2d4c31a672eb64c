//! Property tests for pipeline output bounds.

use std::sync::Arc;

use proptest::prelude::*;

use vigil_core::config::{IndexConfig, PipelineConfig};
use vigil_core::models::AnalysisRequest;
use vigil_index::{EventIndex, HashingEncoder};
use vigil_pipeline::{AnalysisPipeline, HeuristicModel};

const DIMS: usize = 64;

fn pipeline() -> AnalysisPipeline {
    let config = IndexConfig {
        dimensions: DIMS,
        ..IndexConfig::default()
    };
    let index = EventIndex::open_in_memory(Arc::new(HashingEncoder::new(DIMS)), config)
        .expect("open index");
    index.ensure_collection().expect("provision");
    AnalysisPipeline::new(
        Arc::new(index),
        Arc::new(HeuristicModel::new()),
        PipelineConfig::default(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn confidence_and_probabilities_stay_bounded(
        region in "[A-Za-z][A-Za-z ]{0,30}",
        raw in proptest::option::of("[a-z .]{0,200}"),
        interventions in proptest::collection::vec("[A-Za-z ]{1,30}", 0..4),
    ) {
        prop_assume!(!region.trim().is_empty());

        let mut request = AnalysisRequest::new(&region);
        request.raw_data = raw;
        request.interventions = interventions.clone();

        let result = pipeline().run(&request).expect("pipeline run");

        prop_assert!((0.0..=1.0).contains(&result.confidence_score));
        let forecast = &result.trend_analysis.forecast_7_days;
        prop_assert!(forecast.armed_clash_likelihood <= 100);
        prop_assert!(forecast.civilian_targeting_likelihood <= 100);

        let expected = if interventions.is_empty() { 1 } else { interventions.len() };
        prop_assert_eq!(result.scenarios.len(), expected);
        for scenario in &result.scenarios {
            prop_assert!(scenario.optimistic.success_probability <= 100);
            prop_assert!(scenario.pessimistic.risk_probability <= 100);
        }
    }

    #[test]
    fn identical_requests_produce_identical_analysis(
        region in "[A-Za-z]{1,20}",
        raw in "[a-z .]{0,120}",
    ) {
        let mut request = AnalysisRequest::new(&region);
        request.raw_data = Some(raw);

        let p = pipeline();
        let a = p.run(&request).expect("first run");
        let b = p.run(&request).expect("second run");

        prop_assert_eq!(a.confidence_score, b.confidence_score);
        prop_assert_eq!(
            a.trend_analysis.classification.as_str(),
            b.trend_analysis.classification.as_str()
        );
        prop_assert_eq!(a.scenarios.len(), b.scenarios.len());
    }
}
