use crate::config::ScanConfig;
use docket_ident::{matches_with, normalize};
use docket_protocol::{CandidateMatch, SearchSource};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Transient traversal record; converted to a [`CandidateMatch`] on hit and
/// discarded at the end of the owning scan.
pub(crate) struct FolderNode {
    pub path: PathBuf,
    pub name: String,
    pub depth: usize,
}

/// Whether a directory name marks a backups-type subtree. Deliverables there
/// nest one level deeper than elsewhere, so deep year scans descend into it
/// with an extended depth limit even though the name itself carries no digits.
pub(crate) fn is_backup_dir(name: &str) -> bool {
    name.to_lowercase().contains("backup")
}

/// Depth-bounded recursive scan of one directory tree.
///
/// `depth` is the level of `dir` itself (the scan root is 0); descent stops
/// once `depth` reaches `max_depth`. Entries whose names carry no ASCII digit
/// are pruned outright, subtree included, before any identifier extraction.
/// Each directory level fans its child directories out through its own
/// `JoinSet`, so dropping the scan future aborts all outstanding work, and
/// entries are processed in `batch_size` batches with a yield in between so a
/// huge directory never monopolizes the scheduler.
///
/// `backup_bonus` grants backups-type children one extra depth level; it is
/// only set by the deep year scan.
pub(crate) fn scan_tree(
    dir: PathBuf,
    depth: usize,
    max_depth: usize,
    backup_bonus: bool,
    query: Arc<str>,
    config: Arc<ScanConfig>,
) -> Pin<Box<dyn Future<Output = Vec<CandidateMatch>> + Send>> {
    Box::pin(async move {
        let mut found = Vec::new();

        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            Err(e) => {
                log::warn!("skipping unreadable directory {}: {e}", dir.display());
                return found;
            }
        };

        let mut entries = Vec::new();
        loop {
            match read_dir.next_entry().await {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => break,
                Err(e) => {
                    log::warn!("stopping listing of {}: {e}", dir.display());
                    break;
                }
            }
        }

        let mut subdirs: Vec<(FolderNode, usize)> = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            if index > 0 && index % config.batch_size == 0 {
                tokio::task::yield_now().await;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = match entry.file_type().await {
                Ok(file_type) => file_type.is_dir(),
                Err(e) => {
                    log::debug!("cannot stat {}: {e}", entry.path().display());
                    continue;
                }
            };

            // Deliverables under a backups-type folder nest one level deeper,
            // so deep year scans descend into it with an extended limit,
            // whether or not the folder name itself carries digits.
            let backup_child = backup_bonus && is_dir && is_backup_dir(&name);
            let child_max_depth = if backup_child {
                max_depth + 1
            } else {
                max_depth
            };

            if !name.chars().any(|c| c.is_ascii_digit()) {
                // Cannot possibly contain a docket number. The whole subtree
                // is skipped with it, a documented blind spot; backups-type
                // folders in deep year scans are the one exception.
                if backup_child && depth < child_max_depth {
                    subdirs.push((
                        FolderNode {
                            path: entry.path(),
                            name,
                            depth: depth + 1,
                        },
                        child_max_depth,
                    ));
                }
                continue;
            }

            if matches_with(&name, &query, config.min_query_len) {
                found.push(candidate_from(entry.path(), &name, &query).await);
            }

            if is_dir && depth < child_max_depth {
                subdirs.push((
                    FolderNode {
                        path: entry.path(),
                        name,
                        depth: depth + 1,
                    },
                    child_max_depth,
                ));
            }
        }

        // One task group per directory level; branching factor is small in
        // practice, so no global cap beyond it.
        let mut children = JoinSet::new();
        for (node, child_max_depth) in subdirs {
            log::debug!("descending into {} at level {}", node.name, node.depth);
            children.spawn(scan_tree(
                node.path,
                node.depth,
                child_max_depth,
                backup_bonus,
                query.clone(),
                config.clone(),
            ));
        }
        while let Some(joined) = children.join_next().await {
            match joined {
                Ok(mut child_found) => found.append(&mut child_found),
                Err(e) => log::warn!("directory scan task failed: {e}"),
            }
        }

        found
    })
}

/// Build the outgoing candidate for a matched entry. Carries the path and
/// mtime only; `file_count` stays 0 by contract (see [`lazy_file_count`]).
pub(crate) async fn candidate_from(path: PathBuf, name: &str, query: &str) -> CandidateMatch {
    let modified_at = tokio::fs::metadata(&path)
        .await
        .ok()
        .and_then(|meta| meta.modified().ok());

    // Prefer the canonical token, but only when it actually satisfies the
    // predicate; a substring hit on unrelated digits falls back to the name.
    let matched_identifier = normalize(name)
        .map(|id| id.canonical())
        .filter(|canonical| matches_with(canonical, query, 1))
        .unwrap_or_else(|| name.to_string());

    let locator = path.display().to_string();
    CandidateMatch {
        source: SearchSource::Filesystem,
        source_ref: locator.clone(),
        display_name: name.to_string(),
        matched_identifier,
        locator,
        modified_at,
        file_count: 0,
    }
}

/// Count of regular files directly inside `path`.
///
/// Scans never compute this; callers that genuinely need a count (a detail
/// pane, a report) pay for it here, on demand.
pub async fn lazy_file_count(path: &Path) -> std::io::Result<u64> {
    let mut read_dir = tokio::fs::read_dir(path).await?;
    let mut count = 0;
    while let Some(entry) = read_dir.next_entry().await? {
        if entry.file_type().await?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}
