//! SQLite storage for indexed points: provisioning, upsert, scan, count.

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};

use vigil_core::config::IndexConfig;
use vigil_core::errors::{IndexError, VigilError, VigilResult};
use vigil_core::models::ScoredEvent;

use crate::to_index_err;

/// Outcome of collection provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    Exists,
}

/// Create the collection tables if absent and record (or verify) the
/// collection metadata row. Idempotent.
pub fn provision(conn: &Connection, config: &IndexConfig) -> VigilResult<ProvisionOutcome> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS collection_meta (
            name        TEXT PRIMARY KEY,
            dimensions  INTEGER NOT NULL,
            metric      TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS points (
            point_key   TEXT PRIMARY KEY,
            event_id    TEXT NOT NULL,
            embedding   BLOB NOT NULL,
            dimensions  INTEGER NOT NULL,
            metadata    TEXT NOT NULL DEFAULT '{}'
        );

        CREATE INDEX IF NOT EXISTS idx_points_event ON points(event_id);
        ",
    )
    .map_err(|e| to_index_err(format!("provision: {e}")))?;

    let existing: Option<(i64, String)> = conn
        .query_row(
            "SELECT dimensions, metric FROM collection_meta WHERE name = ?1",
            params![config.collection_name],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(|e| to_index_err(format!("provision meta lookup: {e}")))?;

    match existing {
        Some((dims, _metric)) => {
            if dims as usize != config.dimensions {
                return Err(VigilError::Index(IndexError::DimensionMismatch {
                    expected: dims as usize,
                    actual: config.dimensions,
                }));
            }
            Ok(ProvisionOutcome::Exists)
        }
        None => {
            conn.execute(
                "INSERT INTO collection_meta (name, dimensions, metric) VALUES (?1, ?2, ?3)",
                params![
                    config.collection_name,
                    config.dimensions as i64,
                    config.metric
                ],
            )
            .map_err(|e| to_index_err(format!("provision meta insert: {e}")))?;
            Ok(ProvisionOutcome::Created)
        }
    }
}

/// Upsert a point by its deterministic storage key. Re-adding the same key
/// overwrites rather than duplicates.
pub fn upsert_point(
    conn: &Connection,
    point_key: &str,
    event_id: &str,
    embedding: &[f32],
    metadata: &Map<String, Value>,
) -> VigilResult<()> {
    let blob = f32_vec_to_bytes(embedding);
    let metadata_json =
        serde_json::to_string(metadata).map_err(|e| to_index_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO points (point_key, event_id, embedding, dimensions, metadata)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(point_key) DO UPDATE SET
            event_id = excluded.event_id,
            embedding = excluded.embedding,
            dimensions = excluded.dimensions,
            metadata = excluded.metadata",
        params![
            point_key,
            event_id,
            blob,
            embedding.len() as i64,
            metadata_json
        ],
    )
    .map_err(|e| to_index_err(format!("upsert point {event_id}: {e}")))?;
    Ok(())
}

/// Brute-force cosine scan over all stored points, filtered by an
/// equality-conjunction over metadata. Returns at most `top_k` hits
/// ordered by non-increasing similarity.
pub fn scan_similar(
    conn: &Connection,
    query_embedding: &[f32],
    filters: Option<&Map<String, Value>>,
    top_k: usize,
) -> VigilResult<Vec<ScoredEvent>> {
    // Pre-compute query norm once for early-exit on zero-norm queries.
    let query_norm_sq: f64 = query_embedding
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum();
    if query_norm_sq == 0.0 || top_k == 0 {
        return Ok(vec![]);
    }
    let query_len = query_embedding.len();

    let mut stmt = conn
        .prepare("SELECT event_id, embedding, dimensions, metadata FROM points")
        .map_err(|e| to_index_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let event_id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let dims: i64 = row.get(2)?;
            let metadata_json: String = row.get(3)?;
            Ok((event_id, blob, dims, metadata_json))
        })
        .map_err(|e| to_index_err(e.to_string()))?;

    let mut scored: Vec<ScoredEvent> = Vec::new();
    for row in rows {
        let (event_id, blob, dims, metadata_json) =
            row.map_err(|e| to_index_err(e.to_string()))?;
        // Skip dimension mismatches without deserializing the full vector.
        if dims as usize != query_len {
            continue;
        }
        let metadata: Map<String, Value> = serde_json::from_str(&metadata_json)
            .map_err(|e| to_index_err(format!("parse metadata for {event_id}: {e}")))?;
        if !matches_filters(&metadata, filters) {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize);
        let score = cosine_similarity(query_embedding, &stored);
        scored.push(ScoredEvent {
            event_id,
            score,
            metadata,
        });
    }

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    Ok(scored)
}

/// Total number of indexed points.
pub fn count_points(conn: &Connection) -> VigilResult<u64> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM points", [], |row| row.get(0))
        .map_err(|e| to_index_err(e.to_string()))?;
    Ok(n as u64)
}

/// Every filter key/value pair must match the metadata exactly.
/// Absent or empty filters mean unrestricted search.
fn matches_filters(metadata: &Map<String, Value>, filters: Option<&Map<String, Value>>) -> bool {
    let Some(filters) = filters else { return true };
    filters
        .iter()
        .all(|(k, v)| metadata.get(k).map(|m| m == v).unwrap_or(false))
}

/// Convert f32 slice to bytes (little-endian).
fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to f32 vec.
fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

/// Cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_are_equality_conjunction() {
        let mut metadata = Map::new();
        metadata.insert("region".into(), Value::String("Khartoum".into()));
        metadata.insert("source".into(), Value::String("ACLED".into()));

        let mut filters = Map::new();
        filters.insert("region".into(), Value::String("Khartoum".into()));
        assert!(matches_filters(&metadata, Some(&filters)));

        filters.insert("source".into(), Value::String("GDELT".into()));
        assert!(!matches_filters(&metadata, Some(&filters)));

        assert!(matches_filters(&metadata, None));
        assert!(matches_filters(&metadata, Some(&Map::new())));
    }

    #[test]
    fn byte_roundtrip_preserves_vector() {
        let v = vec![0.25f32, -1.5, 3.75, 0.0];
        let bytes = f32_vec_to_bytes(&v);
        assert_eq!(bytes_to_f32_vec(&bytes, 4), v);
    }

    #[test]
    fn cosine_of_orthogonal_is_zero() {
        let a = vec![1.0f32, 0.0];
        let b = vec![0.0f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }
}
