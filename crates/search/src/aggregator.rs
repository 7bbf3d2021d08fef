use crate::raced::raced;
use crate::remote::RemoteAssetMatcher;
use crate::task_index::TaskIndexMatcher;
use docket_ident::DEFAULT_MIN_QUERY_LEN;
use docket_protocol::{
    AggregationResult, CandidateMatch, ProviderError, RemoteAssetProvider, SourceBudgets,
    TaskIndexProvider,
};
use docket_scanner::TreeScanner;
use std::sync::Arc;

/// The aggregation engine's sole entry point.
///
/// Owns one matcher per source and races each against its own budget. The
/// whole pipeline is structured: nothing is detached, so a caller dropping
/// the [`fetch_aggregation`](DocketAggregator::fetch_aggregation) future
/// cancels every in-flight provider call and scan task.
pub struct DocketAggregator {
    task_index: TaskIndexMatcher,
    remote: RemoteAssetMatcher,
    scanner: TreeScanner,
    budgets: SourceBudgets,
    min_query_len: usize,
}

impl DocketAggregator {
    /// The scanner carries its own minimum-query-length guard in its
    /// `ScanConfig`; keep it consistent with `with_min_query_len` or the
    /// stricter of the two wins for filesystem results.
    pub fn new(
        task_provider: Arc<dyn TaskIndexProvider>,
        remote_provider: Arc<dyn RemoteAssetProvider>,
        scanner: TreeScanner,
    ) -> Self {
        Self {
            task_index: TaskIndexMatcher::new(task_provider),
            remote: RemoteAssetMatcher::new(remote_provider),
            scanner,
            budgets: SourceBudgets::default(),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }

    pub fn with_budgets(mut self, budgets: SourceBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    /// Query all three sources concurrently and merge whatever completes
    /// within budget.
    ///
    /// Empty or too-short input short-circuits to an all-empty result without
    /// invoking any provider. A timed-out or failing source contributes an
    /// empty list, logged and non-fatal; this method itself never errors.
    /// Idempotent and read-only; safe to call concurrently.
    pub async fn fetch_aggregation(
        &self,
        docket_number: &str,
        job_name: Option<&str>,
    ) -> AggregationResult {
        let query = docket_number.trim();
        let job_name = job_name.map(str::to_string);
        if query.is_empty() || query.chars().count() < self.min_query_len.max(1) {
            log::debug!("malformed query {docket_number:?}, short-circuiting");
            return AggregationResult::empty(query, job_name);
        }

        let (task_outcome, asset_outcome, folder_outcome) = tokio::join!(
            raced(self.budgets.task_index, async {
                Ok::<_, ProviderError>(self.task_index.search(query, self.min_query_len))
            }),
            raced(
                self.budgets.remote_asset,
                self.remote.search(query, self.min_query_len),
            ),
            raced(self.budgets.filesystem, async {
                Ok::<_, ProviderError>(self.scanner.search(query).await)
            }),
        );

        AggregationResult {
            docket_number: query.to_string(),
            job_name,
            task_matches: absorb(task_outcome, "task index"),
            asset_matches: absorb(asset_outcome, "remote assets"),
            folder_matches: absorb(folder_outcome, "filesystem"),
        }
    }
}

/// Collapse one source's raced outcome into its contribution. Timeouts and
/// provider failures are soft: logged, then treated as "found nothing".
fn absorb(
    outcome: Result<Option<Vec<CandidateMatch>>, ProviderError>,
    source: &str,
) -> Vec<CandidateMatch> {
    match outcome {
        Ok(Some(found)) => found,
        Ok(None) => {
            log::warn!("{source} search exceeded its budget, contributing nothing");
            Vec::new()
        }
        Err(e) => {
            log::warn!("{source} search failed, contributing nothing: {e}");
            Vec::new()
        }
    }
}
