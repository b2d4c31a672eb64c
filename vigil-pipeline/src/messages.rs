//! Message-log helpers.

use std::collections::HashSet;

/// Remove duplicate log lines while preserving order. If the same message
/// appears many times, only the first is kept.
pub fn dedupe_messages(messages: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    messages
        .into_iter()
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_first_occurrence_order() {
        let input = vec![
            "a".to_string(),
            "b".to_string(),
            "a".to_string(),
            "c".to_string(),
            "b".to_string(),
        ];
        assert_eq!(dedupe_messages(input), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_is_empty() {
        assert!(dedupe_messages(Vec::new()).is_empty());
    }
}
