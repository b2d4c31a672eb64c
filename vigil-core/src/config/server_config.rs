use serde::{Deserialize, Serialize};

use crate::constants;

/// HTTP boundary configuration, loadable from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    pub bind_addr: String,
    /// Path to the run-ledger SQLite file.
    pub ledger_path: String,
    /// Path to the event-index SQLite file.
    pub index_path: String,
    /// Whole-pipeline timeout per analysis request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            ledger_path: "vigil-ledger.db".to_string(),
            index_path: "vigil-index.db".to_string(),
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Build a config from `VIGIL_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("VIGIL_BIND_ADDR").unwrap_or(defaults.bind_addr),
            ledger_path: std::env::var("VIGIL_LEDGER_PATH").unwrap_or(defaults.ledger_path),
            index_path: std::env::var("VIGIL_INDEX_PATH").unwrap_or(defaults.index_path),
            request_timeout_secs: std::env::var("VIGIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}
