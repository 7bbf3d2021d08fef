use docket_ident::{matches_with, normalize};
use docket_protocol::{
    CandidateMatch, ProjectDetails, ProjectSummary, ProviderError, RemoteAssetProvider,
    SearchSource,
};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Worst-case bound on the per-project detail fan-out.
const DETAIL_FETCH_CAP: usize = 10;

/// Search source backed by the remote asset-management catalog.
///
/// Two-phase: the cheap full listing is filtered by name first, then details
/// are fetched concurrently for at most [`DETAIL_FETCH_CAP`] survivors. A
/// failed individual detail call keeps its candidate optimistically; partial
/// success is the expected outcome here, not an exception.
pub struct RemoteAssetMatcher {
    provider: Arc<dyn RemoteAssetProvider>,
}

impl RemoteAssetMatcher {
    pub fn new(provider: Arc<dyn RemoteAssetProvider>) -> Self {
        Self { provider }
    }

    /// Phase-1 listing failures are hard errors from this matcher; the
    /// aggregator absorbs them as a soft per-source failure.
    pub async fn search(
        &self,
        query: &str,
        min_query_len: usize,
    ) -> Result<Vec<CandidateMatch>, ProviderError> {
        let projects = self.provider.list_projects().await?;
        let total = projects.len();

        let survivors: Vec<ProjectSummary> = projects
            .into_iter()
            .filter(|project| matches_with(&project.name, query, min_query_len))
            .take(DETAIL_FETCH_CAP)
            .collect();
        log::debug!("{}/{total} remote projects survive the name filter", survivors.len());

        // One detail task per survivor; the cap above bounds the fan-out.
        let mut detail_tasks = JoinSet::new();
        for project in survivors {
            let provider = self.provider.clone();
            detail_tasks.spawn(async move {
                let details = provider.get_project_details(&project.id).await;
                (project, details)
            });
        }

        let mut found = Vec::new();
        while let Some(joined) = detail_tasks.join_next().await {
            let (project, details) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("detail fetch task failed: {e}");
                    continue;
                }
            };
            match details {
                Ok(details) => {
                    if let Some(field) = details.docket_field.as_deref() {
                        if !matches_with(field, query, 1) {
                            log::debug!(
                                "dropping {}: detail identifier {field:?} contradicts query",
                                project.id
                            );
                            continue;
                        }
                    }
                    found.push(candidate_from(project, Some(details), query));
                }
                Err(e) => {
                    log::debug!("details unavailable for {}, keeping optimistically: {e}", project.id);
                    found.push(candidate_from(project, None, query));
                }
            }
        }
        Ok(found)
    }
}

fn candidate_from(
    project: ProjectSummary,
    details: Option<ProjectDetails>,
    query: &str,
) -> CandidateMatch {
    let detail_identifier = details
        .as_ref()
        .and_then(|d| d.docket_field.clone())
        .and_then(|field| normalize(&field).map(|id| id.canonical()));
    let matched_identifier = detail_identifier
        .or_else(|| normalize(&project.name).map(|id| id.canonical()))
        .filter(|canonical| matches_with(canonical, query, 1))
        .unwrap_or_else(|| project.name.clone());

    let locator = details
        .and_then(|d| d.url)
        .unwrap_or_else(|| project.id.clone());
    CandidateMatch {
        source: SearchSource::RemoteAsset,
        source_ref: project.id,
        display_name: project.name,
        matched_identifier,
        locator,
        modified_at: None,
        file_count: 0,
    }
}
