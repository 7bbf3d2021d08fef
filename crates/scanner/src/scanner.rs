use crate::config::{ScanConfig, ScanRoots};
use crate::tree::scan_tree;
use crate::years::scan_year_roots;
use docket_protocol::CandidateMatch;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Filesystem search source: flat roots plus year-partitioned roots.
///
/// Read-only, stateless between calls, and intentionally free of any internal
/// timeout: network mounts can stall, and bounding that risk is the caller's
/// budget's job.
pub struct TreeScanner {
    roots: ScanRoots,
    config: Arc<ScanConfig>,
}

impl TreeScanner {
    pub fn new(roots: ScanRoots, config: ScanConfig) -> Self {
        Self {
            roots,
            config: Arc::new(config),
        }
    }

    /// Search every configured root for entries matching `query`.
    ///
    /// Flat roots and the year base are walked concurrently; results carry no
    /// ordering guarantee. An empty or too-short query returns nothing
    /// without touching the filesystem.
    pub async fn search(&self, query: &str) -> Vec<CandidateMatch> {
        let query = query.trim();
        if query.is_empty() || query.chars().count() < self.config.min_query_len.max(1) {
            return Vec::new();
        }
        let query: Arc<str> = Arc::from(query);

        let mut scans = JoinSet::new();
        for root in &self.roots.flat_roots {
            scans.spawn(scan_tree(
                root.clone(),
                0,
                self.config.max_depth,
                false,
                query.clone(),
                self.config.clone(),
            ));
        }
        if let Some(base) = self.roots.year_base.clone() {
            let prefix = self.roots.year_prefix.clone();
            let year_query = query.clone();
            let config = self.config.clone();
            scans.spawn(async move {
                scan_year_roots(&base, &prefix, year_query, config).await
            });
        }

        let mut found = Vec::new();
        while let Some(joined) = scans.join_next().await {
            match joined {
                Ok(mut root_found) => found.append(&mut root_found),
                Err(e) => log::warn!("root scan task failed: {e}"),
            }
        }
        log::debug!("filesystem search for {query:?} found {} entries", found.len());
        found
    }
}
