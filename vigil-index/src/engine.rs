//! EventIndex — owns the SQLite connection and the encoder, exposes the
//! soft-failure retrieval API plus the one startup-time provisioning call.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use serde_json::{Map, Value};
use tracing::{info, warn};

use vigil_core::config::IndexConfig;
use vigil_core::errors::{IndexError, VigilError, VigilResult};
use vigil_core::models::ScoredEvent;
use vigil_core::traits::IEventEncoder;

use crate::store::{self, ProvisionOutcome};
use crate::to_index_err;

/// The event index. Encodes text through the injected encoder and stores
/// points keyed by a deterministic hash of the logical event id.
pub struct EventIndex {
    conn: Mutex<Connection>,
    encoder: Arc<dyn IEventEncoder>,
    config: IndexConfig,
}

impl EventIndex {
    /// Open an index backed by a file on disk.
    pub fn open(
        path: &Path,
        encoder: Arc<dyn IEventEncoder>,
        config: IndexConfig,
    ) -> VigilResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            VigilError::Index(IndexError::Provisioning {
                reason: format!("open {}: {e}", path.display()),
            })
        })?;
        Self::from_connection(conn, encoder, config)
    }

    /// Open an in-memory index (for testing).
    pub fn open_in_memory(
        encoder: Arc<dyn IEventEncoder>,
        config: IndexConfig,
    ) -> VigilResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            VigilError::Index(IndexError::Provisioning {
                reason: format!("open in-memory: {e}"),
            })
        })?;
        Self::from_connection(conn, encoder, config)
    }

    fn from_connection(
        conn: Connection,
        encoder: Arc<dyn IEventEncoder>,
        config: IndexConfig,
    ) -> VigilResult<Self> {
        conn.execute_batch(&format!(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = {};",
            vigil_core::constants::PROVISIONING_BUSY_TIMEOUT_MS
        ))
        .map_err(|e| {
            VigilError::Index(IndexError::Provisioning {
                reason: format!("pragmas: {e}"),
            })
        })?;
        Ok(Self {
            conn: Mutex::new(conn),
            encoder,
            config,
        })
    }

    /// Idempotent create-if-absent provisioning. Must be called once before
    /// any other operation. Propagates on error — this is a startup-time
    /// dependency, not a per-request one.
    pub fn ensure_collection(&self) -> VigilResult<()> {
        if self.encoder.dimensions() != self.config.dimensions {
            return Err(VigilError::Index(IndexError::DimensionMismatch {
                expected: self.config.dimensions,
                actual: self.encoder.dimensions(),
            }));
        }
        if !self.encoder.is_available() {
            warn!(
                encoder = self.encoder.name(),
                "encoder reports unavailable; ingestion and retrieval will degrade"
            );
        }

        let conn = self.lock_conn()?;
        match store::provision(&conn, &self.config)? {
            ProvisionOutcome::Created => {
                info!(
                    collection = %self.config.collection_name,
                    dimensions = self.config.dimensions,
                    metric = %self.config.metric,
                    encoder = self.encoder.name(),
                    "created collection"
                );
            }
            ProvisionOutcome::Exists => {
                info!(
                    collection = %self.config.collection_name,
                    "collection exists"
                );
            }
        }
        Ok(())
    }

    /// Add (or overwrite) one event. Returns `false` on any failure —
    /// ingestion is many small operations and one bad event must not
    /// abort a batch.
    pub fn add_event(
        &self,
        event_id: &str,
        text: &str,
        metadata: &Map<String, Value>,
    ) -> bool {
        match self.try_add_event(event_id, text, metadata) {
            Ok(()) => true,
            Err(e) => {
                warn!(event_id = %event_id, error = %e, "failed to add event");
                false
            }
        }
    }

    /// Nearest-neighbor search filtered by metadata equality. Returns an
    /// empty list on failure — retrieval is a soft dependency: a broken
    /// index degrades analysis quality but must not abort the request.
    pub fn semantic_search(
        &self,
        query: &str,
        filters: Option<&Map<String, Value>>,
        top_k: usize,
    ) -> Vec<ScoredEvent> {
        match self.try_search(query, filters, top_k) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(query = %query, error = %e, "semantic search failed");
                Vec::new()
            }
        }
    }

    /// Total indexed events; `0` on failure.
    pub fn count(&self) -> u64 {
        match self.try_count() {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "event count failed");
                0
            }
        }
    }

    /// The configured collection name.
    pub fn collection_name(&self) -> &str {
        &self.config.collection_name
    }

    fn try_add_event(
        &self,
        event_id: &str,
        text: &str,
        metadata: &Map<String, Value>,
    ) -> VigilResult<()> {
        let embedding = self.encoder.encode(text).map_err(|e| {
            VigilError::Index(IndexError::EncodingFailed {
                reason: e.to_string(),
            })
        })?;
        let key = derive_storage_key(event_id);

        // Duplicate the logical id inside the payload for round-trip retrieval.
        let mut payload = metadata.clone();
        payload.insert("event_id".to_string(), Value::String(event_id.to_string()));

        let conn = self.lock_conn()?;
        store::upsert_point(&conn, &key, event_id, &embedding, &payload)
    }

    fn try_search(
        &self,
        query: &str,
        filters: Option<&Map<String, Value>>,
        top_k: usize,
    ) -> VigilResult<Vec<ScoredEvent>> {
        let query_embedding = self.encoder.encode(query).map_err(|e| {
            VigilError::Index(IndexError::EncodingFailed {
                reason: e.to_string(),
            })
        })?;
        let conn = self.lock_conn()?;
        store::scan_similar(&conn, &query_embedding, filters, top_k)
    }

    fn try_count(&self) -> VigilResult<u64> {
        let conn = self.lock_conn()?;
        store::count_points(&conn)
    }

    fn lock_conn(&self) -> VigilResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| to_index_err(format!("index lock poisoned: {e}")))
    }
}

/// Derive the internal storage key from a logical event id.
///
/// Pure and stable: the same logical id always maps to the same key, so
/// re-adding an event overwrites instead of duplicating.
pub fn derive_storage_key(event_id: &str) -> String {
    blake3::hash(event_id.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_is_pure_and_stable() {
        let a = derive_storage_key("gdelt-138");
        let b = derive_storage_key("gdelt-138");
        let c = derive_storage_key("gdelt-139");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
