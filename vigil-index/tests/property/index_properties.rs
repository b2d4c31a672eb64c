//! Property tests: retrieval ordering, top-k bound, storage-key stability.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::Map;

use vigil_core::config::IndexConfig;
use vigil_index::engine::derive_storage_key;
use vigil_index::{EventIndex, HashingEncoder};

fn small_config() -> IndexConfig {
    IndexConfig {
        dimensions: 32,
        ..IndexConfig::default()
    }
}

proptest! {
    #[test]
    fn storage_key_deterministic(id in "[a-z0-9-]{1,40}") {
        prop_assert_eq!(derive_storage_key(&id), derive_storage_key(&id));
    }

    #[test]
    fn search_is_bounded_and_ordered(
        texts in proptest::collection::vec("[a-z ]{4,40}", 1..20),
        top_k in 0usize..15,
    ) {
        let index = EventIndex::open_in_memory(
            Arc::new(HashingEncoder::new(32)),
            small_config(),
        ).unwrap();
        index.ensure_collection().unwrap();

        for (i, text) in texts.iter().enumerate() {
            index.add_event(&format!("ev-{i}"), text, &Map::new());
        }

        let hits = index.semantic_search(&texts[0], None, top_k);
        prop_assert!(hits.len() <= top_k);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn readding_same_id_never_grows_count(
        text_a in "[a-z ]{4,40}",
        text_b in "[a-z ]{4,40}",
    ) {
        let index = EventIndex::open_in_memory(
            Arc::new(HashingEncoder::new(32)),
            small_config(),
        ).unwrap();
        index.ensure_collection().unwrap();

        index.add_event("ev-same", &text_a, &Map::new());
        index.add_event("ev-same", &text_b, &Map::new());
        prop_assert_eq!(index.count(), 1);
    }
}
