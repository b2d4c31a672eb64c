//! The single serialized write connection. SQLite allows one writer at a
//! time; funneling all writes through one mutex-guarded connection turns
//! write contention into queueing instead of SQLITE_BUSY errors.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use vigil_core::errors::VigilResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// The write half of the pool.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection, creating the database file if absent.
    pub fn open(path: &Path) -> VigilResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| to_storage_err(format!("open {}: {e}", path.display())))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with exclusive access to the write connection.
    pub fn with_conn<F, T>(&self, f: F) -> VigilResult<T>
    where
        F: FnOnce(&Connection) -> VigilResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
