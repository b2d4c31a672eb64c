//! Stage 1: retrieval. Always executes; a broken or empty index degrades
//! the analysis but never aborts it.

use serde_json::{Map, Value};
use tracing::debug;

use vigil_core::models::{AnalysisRequest, ScoredEvent};
use vigil_index::EventIndex;

/// Query the index for events semantically related to the request,
/// restricted to the request's region.
pub fn run(
    index: &EventIndex,
    request: &AnalysisRequest,
    top_k: usize,
    messages: &mut Vec<String>,
) -> Vec<ScoredEvent> {
    let query = build_query(request);

    let mut filters = Map::new();
    filters.insert(
        "region".to_string(),
        Value::String(request.region.clone()),
    );

    let hits = index.semantic_search(&query, Some(&filters), top_k);
    debug!(region = %request.region, hits = hits.len(), "retrieval stage complete");

    if hits.is_empty() {
        messages.push(format!(
            "warning: retrieval returned no corroborating events for {}",
            request.region
        ));
    } else {
        messages.push(format!(
            "retrieved {} related event(s) for {}",
            hits.len(),
            request.region
        ));
    }
    hits
}

/// Derive the search query from the region, widened with a snippet of the
/// raw text when one was supplied.
fn build_query(request: &AnalysisRequest) -> String {
    let base = format!("recent conflict events in {}", request.region);
    match request.raw_data.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            let snippet: String = raw.chars().take(200).collect();
            format!("{base}: {snippet}")
        }
        _ => base,
    }
}
