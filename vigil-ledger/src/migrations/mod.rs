//! Versioned schema migrations, applied in order at ledger open.
//! `PRAGMA user_version` tracks the applied version.

mod v001_analysis_runs;
mod v002_run_feedback;

use rusqlite::Connection;

use vigil_core::errors::{StorageError, VigilError, VigilResult};

use crate::to_storage_err;

/// The schema version this build expects.
pub const CURRENT_VERSION: u32 = 2;

/// Apply any pending migrations. Idempotent.
pub fn run_migrations(conn: &Connection) -> VigilResult<()> {
    let mut version = current_version(conn)?;
    while version < CURRENT_VERSION {
        let next = version + 1;
        apply(conn, next).map_err(|e| {
            VigilError::Storage(StorageError::MigrationFailed {
                version: next,
                reason: e.to_string(),
            })
        })?;
        set_version(conn, next)?;
        tracing::info!(version = next, "applied ledger migration");
        version = next;
    }
    Ok(())
}

fn apply(conn: &Connection, version: u32) -> VigilResult<()> {
    match version {
        1 => v001_analysis_runs::migrate(conn),
        2 => v002_run_feedback::migrate(conn),
        other => Err(to_storage_err(format!("unknown migration version {other}"))),
    }
}

fn current_version(conn: &Connection) -> VigilResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

fn set_version(conn: &Connection, version: u32) -> VigilResult<()> {
    conn.pragma_update(None, "user_version", version)
        .map_err(|e| to_storage_err(e.to_string()))
}
