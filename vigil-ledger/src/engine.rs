//! RunLedger — best-effort persistence of completed analysis runs.

use std::path::Path;

use tracing::{info, warn};

use vigil_core::constants::{DEFAULT_RUN_LIST_LIMIT, MAX_RUN_LIST_LIMIT};
use vigil_core::errors::VigilResult;
use vigil_core::models::{AnalysisResult, AnalysisRun, Feedback, FeedbackAck};

use crate::migrations;
use crate::pool::{pragmas, ConnectionPool, ReadPool};
use crate::queries::run_ops;

/// Message appended to the result when persistence failed.
pub const PERSISTENCE_WARNING: &str =
    "warning: analysis persistence unavailable; run was not recorded";

/// The run ledger. Writes funnel through one connection, reads fan out
/// over the pool.
pub struct RunLedger {
    pool: ConnectionPool,
}

impl RunLedger {
    /// Open the ledger and apply pending migrations.
    pub fn open(path: &Path) -> VigilResult<Self> {
        let pool = ConnectionPool::open(path, ReadPool::default_size())?;
        pool.writer.with_conn(migrations::run_migrations)?;
        if !pool.writer.with_conn(pragmas::verify_wal_mode)? {
            warn!(path = %path.display(), "ledger database is not in WAL mode");
        }
        info!(
            path = %path.display(),
            readers = pool.readers.size(),
            "run ledger opened"
        );
        Ok(Self { pool })
    }

    /// Record one completed run. Best-effort: persistence failure appends a
    /// warning to the result's messages and returns `None` instead of
    /// failing the analysis that already succeeded.
    pub fn record(&self, result: &mut AnalysisResult) -> Option<i64> {
        match self.pool.writer.with_conn(|conn| run_ops::insert_run(conn, result)) {
            Ok(id) => {
                info!(run_id = id, region = %result.region, "analysis run recorded");
                Some(id)
            }
            Err(e) => {
                warn!(region = %result.region, error = %e, "failed to record analysis run");
                result.messages.push(PERSISTENCE_WARNING.to_string());
                None
            }
        }
    }

    /// List the most recent runs, newest first. Limit is clamped to the
    /// configured page bounds. Propagates on failure.
    pub fn list(&self, limit: Option<usize>) -> VigilResult<Vec<AnalysisRun>> {
        let limit = limit
            .unwrap_or(DEFAULT_RUN_LIST_LIMIT)
            .clamp(1, MAX_RUN_LIST_LIMIT);
        self.pool
            .readers
            .with_conn(|conn| run_ops::list_runs(conn, limit))
    }

    /// Fetch one run by id. Propagates on failure; `None` when absent.
    pub fn get(&self, id: i64) -> VigilResult<Option<AnalysisRun>> {
        self.pool.readers.with_conn(|conn| run_ops::get_run(conn, id))
    }

    /// Append feedback to a run's audit trail. The run row itself is never
    /// mutated. Returns `None` when the run does not exist.
    pub fn attach_feedback(
        &self,
        id: i64,
        feedback: &Feedback,
    ) -> VigilResult<Option<FeedbackAck>> {
        let exists = self
            .pool
            .readers
            .with_conn(|conn| run_ops::run_exists(conn, id))?;
        if !exists {
            return Ok(None);
        }
        self.pool
            .writer
            .with_conn(|conn| run_ops::insert_feedback(conn, id, feedback))?;
        info!(run_id = id, approved = feedback.approved, "feedback recorded");
        Ok(Some(FeedbackAck::new(id, feedback.approved)))
    }

    /// Underlying pool, exposed for maintenance tooling and tests.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }
}
