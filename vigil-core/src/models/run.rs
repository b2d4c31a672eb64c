use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::APPROVAL_CONFIDENCE_THRESHOLD;

/// The durable, denormalized record of one completed pipeline execution.
///
/// `id` is assigned by storage on insert. The row itself is never mutated;
/// feedback lives in a write-only audit table and is only surfaced here on
/// reads via `human_feedback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub id: i64,
    pub region: String,
    pub has_raw_data: bool,
    pub interventions: Vec<String>,
    pub trend_classification: Option<String>,
    pub trend_confidence_label: Option<String>,
    pub forecast_armed_clash: Option<u8>,
    pub forecast_civilian_targeting: Option<u8>,
    /// Distinct scenario recommendations, sorted and ", "-joined.
    pub recommendation_summary: Option<String>,
    pub max_success_probability: Option<u8>,
    pub max_risk_probability: Option<u8>,
    pub validation_status: Option<String>,
    pub issue_count: usize,
    pub overall_confidence: f64,
    /// Derived at read time from `overall_confidence`, never stored.
    pub approval_status: Option<String>,
    /// Latest feedback comment from the audit trail, if any.
    pub human_feedback: Option<String>,
    pub explainability: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Caller feedback on a recorded run. Write-only: appended to the audit
/// trail, never merged back into the run row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub approved: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Acknowledgement returned after feedback capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAck {
    pub run_id: i64,
    /// "approved" or "rejected".
    pub status: String,
}

impl FeedbackAck {
    pub fn new(run_id: i64, approved: bool) -> Self {
        Self {
            run_id,
            status: if approved { "approved" } else { "rejected" }.to_string(),
        }
    }
}

/// Approval label for runs that never went through explicit review:
/// low-confidence analyses stay "pending", the rest are "auto-approved".
pub fn derive_approval_status(overall_confidence: f64) -> &'static str {
    if overall_confidence < APPROVAL_CONFIDENCE_THRESHOLD {
        "pending"
    } else {
        "auto-approved"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_status_threshold() {
        assert_eq!(derive_approval_status(0.0), "pending");
        assert_eq!(derive_approval_status(0.69), "pending");
        assert_eq!(derive_approval_status(0.7), "auto-approved");
        assert_eq!(derive_approval_status(1.0), "auto-approved");
    }

    #[test]
    fn feedback_ack_status_labels() {
        assert_eq!(FeedbackAck::new(1, true).status, "approved");
        assert_eq!(FeedbackAck::new(1, false).status, "rejected");
    }
}
