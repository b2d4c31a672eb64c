//! Insert, get, list for analysis runs plus the feedback audit trail.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use vigil_core::errors::VigilResult;
use vigil_core::models::{derive_approval_status, AnalysisResult, AnalysisRun, Feedback};

use crate::summary;
use crate::to_storage_err;

/// Insert one completed run. Wrapped in a transaction so a partial row is
/// never visible. Returns the assigned row id.
pub fn insert_run(conn: &Connection, result: &AnalysisResult) -> VigilResult<i64> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_run begin: {e}")))?;

    match insert_run_inner(&tx, result) {
        Ok(id) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("insert_run commit: {e}")))?;
            Ok(id)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn insert_run_inner(conn: &Connection, result: &AnalysisResult) -> VigilResult<i64> {
    let interventions_json =
        serde_json::to_string(&result.interventions).map_err(|e| to_storage_err(e.to_string()))?;
    let explainability_json = result
        .explainability
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let forecast = &result.trend_analysis.forecast_7_days;

    conn.execute(
        "INSERT INTO analysis_runs (
            region, has_raw_data, interventions,
            trend_classification, trend_confidence_label,
            forecast_armed_clash, forecast_civilian_targeting,
            recommendation_summary, max_success_probability, max_risk_probability,
            validation_status, issue_count, overall_confidence,
            explainability, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            result.region,
            result.has_raw_data as i32,
            interventions_json,
            result.trend_analysis.classification.as_str(),
            result.trend_analysis.confidence_label,
            forecast.armed_clash_likelihood,
            forecast.civilian_targeting_likelihood,
            summary::recommendation_summary(&result.scenarios),
            summary::max_success_probability(&result.scenarios),
            summary::max_risk_probability(&result.scenarios),
            result.validation.status.as_str(),
            result.validation.issues.len() as i64,
            result.overall_confidence(),
            explainability_json,
            result.timestamp.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

/// Fetch one run by id, with its latest feedback comment attached.
pub fn get_run(conn: &Connection, id: i64) -> VigilResult<Option<AnalysisRun>> {
    let run = conn
        .query_row(
            &format!("SELECT {RUN_COLUMNS} FROM analysis_runs WHERE id = ?1"),
            params![id],
            row_to_run,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match run {
        Some(mut run) => {
            run.human_feedback = latest_feedback_comment(conn, run.id)?;
            Ok(Some(run))
        }
        None => Ok(None),
    }
}

/// List the most recent runs, newest first.
pub fn list_runs(conn: &Connection, limit: usize) -> VigilResult<Vec<AnalysisRun>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {RUN_COLUMNS} FROM analysis_runs
             ORDER BY created_at DESC, id DESC LIMIT ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit as i64], row_to_run)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut runs = Vec::new();
    for row in rows {
        let mut run = row.map_err(|e| to_storage_err(e.to_string()))?;
        run.human_feedback = latest_feedback_comment(conn, run.id)?;
        runs.push(run);
    }
    Ok(runs)
}

/// Whether a run row exists.
pub fn run_exists(conn: &Connection, id: i64) -> VigilResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM analysis_runs WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(found.is_some())
}

/// Append one feedback entry to the audit trail.
pub fn insert_feedback(conn: &Connection, run_id: i64, feedback: &Feedback) -> VigilResult<()> {
    conn.execute(
        "INSERT INTO run_feedback (run_id, approved, comment) VALUES (?1, ?2, ?3)",
        params![run_id, feedback.approved as i32, feedback.comment],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// The most recent non-null feedback comment for a run.
pub fn latest_feedback_comment(conn: &Connection, run_id: i64) -> VigilResult<Option<String>> {
    conn.query_row(
        "SELECT comment FROM run_feedback
         WHERE run_id = ?1 AND comment IS NOT NULL
         ORDER BY id DESC LIMIT 1",
        params![run_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

const RUN_COLUMNS: &str = "id, region, has_raw_data, interventions,
    trend_classification, trend_confidence_label,
    forecast_armed_clash, forecast_civilian_targeting,
    recommendation_summary, max_success_probability, max_risk_probability,
    validation_status, issue_count, overall_confidence, explainability, created_at";

fn row_to_run(row: &Row<'_>) -> rusqlite::Result<AnalysisRun> {
    let interventions_json: String = row.get(3)?;
    let explainability_json: Option<String> = row.get(14)?;
    let created_at_raw: String = row.get(15)?;
    let overall_confidence: f64 = row.get(13)?;

    Ok(AnalysisRun {
        id: row.get(0)?,
        region: row.get(1)?,
        has_raw_data: row.get::<_, i32>(2)? != 0,
        interventions: serde_json::from_str(&interventions_json).unwrap_or_default(),
        trend_classification: row.get(4)?,
        trend_confidence_label: row.get(5)?,
        forecast_armed_clash: row.get(6)?,
        forecast_civilian_targeting: row.get(7)?,
        recommendation_summary: row.get(8)?,
        max_success_probability: row.get(9)?,
        max_risk_probability: row.get(10)?,
        validation_status: row.get(11)?,
        issue_count: row.get::<_, i64>(12)? as usize,
        overall_confidence,
        approval_status: Some(derive_approval_status(overall_confidence).to_string()),
        human_feedback: None,
        explainability: explainability_json.and_then(|s| serde_json::from_str(&s).ok()),
        created_at: parse_timestamp(&created_at_raw),
    })
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
