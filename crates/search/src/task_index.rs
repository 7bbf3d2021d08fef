use docket_ident::{matches_with, normalize};
use docket_protocol::{CandidateMatch, SearchSource, TaskIndexProvider, TaskRecord};
use std::cmp::Reverse;
use std::sync::Arc;

/// Search source backed by the pre-synced task snapshot.
///
/// A plain O(n) scan over a bounded in-memory snapshot (thousands of rows),
/// no I/O; the provider's cache sync protocol is someone else's problem.
pub struct TaskIndexMatcher {
    provider: Arc<dyn TaskIndexProvider>,
}

impl TaskIndexMatcher {
    pub fn new(provider: Arc<dyn TaskIndexProvider>) -> Self {
        Self { provider }
    }

    /// Filter the snapshot by identifier match, sorted by descending numeric
    /// identifier, then ascending display name.
    pub fn search(&self, query: &str, min_query_len: usize) -> Vec<CandidateMatch> {
        let mut found: Vec<CandidateMatch> = self
            .provider
            .load_all()
            .into_iter()
            .filter(|record| {
                matches_with(&record.identifier_text, query, min_query_len)
                    || matches_with(&record.display_name, query, min_query_len)
            })
            .map(|record| candidate_from(record, query))
            .collect();

        found.sort_by(|a, b| {
            let a_key = (Reverse(numeric_id(&a.matched_identifier)), &a.display_name);
            let b_key = (Reverse(numeric_id(&b.matched_identifier)), &b.display_name);
            a_key.cmp(&b_key)
        });
        found
    }
}

fn numeric_id(identifier: &str) -> u32 {
    normalize(identifier).map(|id| id.number()).unwrap_or(0)
}

fn candidate_from(record: TaskRecord, query: &str) -> CandidateMatch {
    let matched_identifier = normalize(&record.identifier_text)
        .map(|id| id.canonical())
        .filter(|canonical| matches_with(canonical, query, 1))
        .unwrap_or_else(|| record.identifier_text.clone());

    let locator = record
        .url
        .clone()
        .unwrap_or_else(|| format!("task://{}", record.id));
    CandidateMatch {
        source: SearchSource::TaskIndex,
        source_ref: record.id,
        display_name: record.display_name,
        matched_identifier,
        locator,
        modified_at: record.modified_at,
        file_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Snapshot(Vec<TaskRecord>);

    impl TaskIndexProvider for Snapshot {
        fn load_all(&self) -> Vec<TaskRecord> {
            self.0.clone()
        }
    }

    fn record(id: &str, identifier_text: &str, display_name: &str) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            identifier_text: identifier_text.to_string(),
            display_name: display_name.to_string(),
            url: None,
            modified_at: None,
        }
    }

    fn matcher(records: Vec<TaskRecord>) -> TaskIndexMatcher {
        TaskIndexMatcher::new(Arc::new(Snapshot(records)))
    }

    #[test]
    fn filters_by_identifier_match() {
        let matcher = matcher(vec![
            record("t1", "25464-AB Mix", "Night Mix"),
            record("t2", "31002 Spot", "Spot"),
        ]);

        let found = matcher.search("25464", 1);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source_ref, "t1");
        assert_eq!(found[0].matched_identifier, "25464-AB");
        assert_eq!(found[0].locator, "task://t1");
    }

    #[test]
    fn sorts_descending_by_number_then_by_name() {
        let matcher = matcher(vec![
            record("t1", "25401 Promo", "Promo"),
            record("t2", "25464 Mix B", "B Mix"),
            record("t3", "25464 Mix A", "A Mix"),
        ]);

        let found = matcher.search("254", 1);

        let order: Vec<&str> = found.iter().map(|m| m.source_ref.as_str()).collect();
        assert_eq!(order, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn substring_match_keeps_raw_identifier_text() {
        // Row matches only through its display name; matched_identifier
        // must still satisfy the predicate, so it stays the raw text.
        let matcher = matcher(vec![record("t1", "misc 254 batch", "misc 254 batch")]);

        let found = matcher.search("254", 1);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].matched_identifier, "misc 254 batch");
    }

    #[test]
    fn guard_blocks_too_short_queries() {
        let matcher = matcher(vec![record("t1", "25464 Mix", "Mix")]);
        assert_eq!(matcher.search("2", 3), Vec::new());
        assert_eq!(matcher.search("254", 3).len(), 1);
    }
}
