//! Workspace-wide constants and tuning defaults.

/// Embedding dimensionality fixed at collection-creation time.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;

/// Logical name of the event collection.
pub const DEFAULT_COLLECTION_NAME: &str = "conflict_events";

/// Distance metric recorded with the collection.
pub const DEFAULT_DISTANCE_METRIC: &str = "cosine";

/// Default number of nearest neighbors returned by a search.
pub const DEFAULT_TOP_K: usize = 10;

/// Forecast horizon in days.
pub const FORECAST_HORIZON_DAYS: u32 = 7;

/// Confidence penalty applied per consistency issue.
pub const ISSUE_CONFIDENCE_PENALTY: f64 = 0.15;

/// Overall confidence is capped at this value when retrieval returned
/// zero corroborating events.
pub const ZERO_RETRIEVAL_CONFIDENCE_CAP: f64 = 0.5;

/// Confidence gain per corroborating retrieved event, up to 1.0.
pub const CORROBORATION_GAIN_PER_EVENT: f64 = 0.1;

/// Runs below this overall confidence are labeled "pending" rather
/// than "auto-approved".
pub const APPROVAL_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Issue count at or above which a run is marked Invalid.
pub const INVALID_ISSUE_THRESHOLD: usize = 3;

/// Default request-level timeout for one analysis, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// One-time provisioning busy timeout, in milliseconds. Generous because
/// it only runs at process start, never on the request path.
pub const PROVISIONING_BUSY_TIMEOUT_MS: u64 = 60_000;

/// Default and maximum page size for run listing.
pub const DEFAULT_RUN_LIST_LIMIT: usize = 20;
pub const MAX_RUN_LIST_LIMIT: usize = 100;
