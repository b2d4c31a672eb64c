//! v001: analysis_runs, the denormalized record of completed pipeline runs.

use rusqlite::Connection;

use vigil_core::errors::VigilResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> VigilResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS analysis_runs (
            id                          INTEGER PRIMARY KEY AUTOINCREMENT,
            region                      TEXT NOT NULL,
            has_raw_data                INTEGER NOT NULL DEFAULT 0,
            interventions               TEXT NOT NULL DEFAULT '[]',
            trend_classification        TEXT,
            trend_confidence_label      TEXT,
            forecast_armed_clash        INTEGER,
            forecast_civilian_targeting INTEGER,
            recommendation_summary      TEXT,
            max_success_probability     INTEGER,
            max_risk_probability        INTEGER,
            validation_status           TEXT,
            issue_count                 INTEGER NOT NULL DEFAULT 0,
            overall_confidence          REAL NOT NULL DEFAULT 0.0,
            explainability              TEXT,
            created_at                  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_runs_region ON analysis_runs(region);
        CREATE INDEX IF NOT EXISTS idx_runs_created ON analysis_runs(created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
