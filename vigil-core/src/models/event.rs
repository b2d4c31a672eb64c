use serde::{Deserialize, Serialize};

/// One nearest-neighbor hit from the event index.
///
/// Ephemeral: produced per query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEvent {
    /// Caller-supplied logical identifier, round-tripped via the payload.
    pub event_id: String,
    /// Cosine similarity against the query, higher is closer.
    pub score: f64,
    /// Open metadata mapping (region, date, source, ...).
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// A structured event candidate extracted from raw text.
///
/// Shape is intentionally loose — every field optional except the action,
/// so downstream consumers can extend it without breaking extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEvent {
    pub actor: Option<String>,
    pub action: String,
    pub location: Option<String>,
    pub date: Option<String>,
}

/// Extraction stage output. Present only when raw text was supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEvents {
    pub events: Vec<ExtractedEvent>,
    pub summary: String,
}
