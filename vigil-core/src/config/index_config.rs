use serde::{Deserialize, Serialize};

use crate::constants;

/// EventIndex configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Logical collection name, recorded at provisioning time.
    pub collection_name: String,
    /// Embedding dimensionality, fixed at collection creation.
    pub dimensions: usize,
    /// Distance metric label recorded with the collection.
    pub metric: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            collection_name: constants::DEFAULT_COLLECTION_NAME.to_string(),
            dimensions: constants::DEFAULT_EMBEDDING_DIMENSIONS,
            metric: constants::DEFAULT_DISTANCE_METRIC.to_string(),
        }
    }
}
