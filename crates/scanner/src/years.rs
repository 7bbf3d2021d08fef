use crate::config::ScanConfig;
use crate::tree::{candidate_from, scan_tree};
use docket_ident::matches_with;
use docket_protocol::CandidateMatch;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// A `<prefix><YYYY>` directory under the server base path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct YearRoot {
    year: u16,
    path: PathBuf,
}

/// Parse `name` as `<prefix><YYYY>`, case-insensitive on the prefix.
fn parse_year_root(name: &str, prefix: &str) -> Option<u16> {
    // A multibyte character spanning the split point means the name cannot
    // start with the prefix; splitting there would panic.
    if name.len() < prefix.len() || !name.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, tail) = name.split_at(prefix.len());
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    if tail.len() != 4 || !tail.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}

async fn enumerate_year_roots(base: &Path, prefix: &str) -> Vec<YearRoot> {
    let mut roots = Vec::new();
    let mut read_dir = match tokio::fs::read_dir(base).await {
        Ok(read_dir) => read_dir,
        Err(e) => {
            log::warn!("cannot list year base {}: {e}", base.display());
            return roots;
        }
    };
    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                log::warn!("stopping listing of {}: {e}", base.display());
                break;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(year) = parse_year_root(&name, prefix) else {
            continue;
        };
        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => roots.push(YearRoot {
                year,
                path: entry.path(),
            }),
            Ok(_) => {}
            Err(e) => log::debug!("cannot stat {}: {e}", entry.path().display()),
        }
    }
    // Most recent first: recency drives how much effort each root gets.
    roots.sort_by(|a, b| b.year.cmp(&a.year));
    roots
}

/// Immediate-children-only pass for an old year root: test each child name,
/// never descend. Yields between items to stay cooperative on slow mounts.
async fn shallow_scan(root: &Path, query: &str, config: &ScanConfig) -> Vec<CandidateMatch> {
    let mut found = Vec::new();
    let mut read_dir = match tokio::fs::read_dir(root).await {
        Ok(read_dir) => read_dir,
        Err(e) => {
            log::warn!("skipping unreadable year root {}: {e}", root.display());
            return found;
        }
    };
    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                log::warn!("stopping listing of {}: {e}", root.display());
                break;
            }
        };
        tokio::task::yield_now().await;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        if matches_with(&name, query, config.min_query_len) {
            found.push(candidate_from(entry.path(), &name, query).await);
        }
    }
    found
}

/// Search every year root, newest first.
///
/// The `deep_year_count` most recent roots get the full recursive scan,
/// concurrently and with the backups depth bonus; older roots get only the
/// shallow name check, sequentially. Thorough coverage of likely-active years
/// is deliberately traded against exhaustive coverage of historical ones;
/// an old docket whose folder name carries the digits still surfaces through
/// the shallow pass.
pub(crate) async fn scan_year_roots(
    base: &Path,
    prefix: &str,
    query: Arc<str>,
    config: Arc<ScanConfig>,
) -> Vec<CandidateMatch> {
    let roots = enumerate_year_roots(base, prefix).await;
    if roots.is_empty() {
        log::debug!("no year roots under {}", base.display());
        return Vec::new();
    }

    let deep_count = config.deep_year_count.min(roots.len());
    let (recent, older) = roots.split_at(deep_count);

    let mut found = Vec::new();

    // At most `deep_year_count` roots in flight; dropping this future
    // aborts them all.
    let mut deep_scans = JoinSet::new();
    for root in recent {
        log::debug!("deep scan of year root {}", root.path.display());
        deep_scans.spawn(scan_tree(
            root.path.clone(),
            0,
            config.max_depth,
            true,
            query.clone(),
            config.clone(),
        ));
    }
    while let Some(joined) = deep_scans.join_next().await {
        match joined {
            Ok(mut year_found) => found.append(&mut year_found),
            Err(e) => log::warn!("year scan task failed: {e}"),
        }
    }

    for root in older {
        log::debug!("shallow scan of year root {}", root.path.display());
        found.extend(shallow_scan(&root.path, &query, &config).await);
    }

    found
}
