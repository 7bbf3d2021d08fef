use std::path::PathBuf;

/// Where to look.
#[derive(Debug, Clone, Default)]
pub struct ScanRoots {
    /// Non-partitioned roots scanned in full: active sessions, prep, WIP.
    pub flat_roots: Vec<PathBuf>,
    /// Server base path holding the year-partitioned roots, if any.
    pub year_base: Option<PathBuf>,
    /// Fixed name prefix of a year root, e.g. `"Jobs "` for `Jobs 2025`.
    pub year_prefix: String,
}

/// How hard to look.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Deepest directory level recursed into, root being level 0.
    pub max_depth: usize,
    /// Entries processed between cooperative yields inside one directory.
    pub batch_size: usize,
    /// How many of the most recent year roots get the full deep scan;
    /// older years only get their immediate children's names tested.
    pub deep_year_count: usize,
    /// Minimum query length forwarded to the match predicate.
    pub min_query_len: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            batch_size: 100,
            deep_year_count: 3,
            min_query_len: docket_ident::DEFAULT_MIN_QUERY_LEN,
        }
    }
}
