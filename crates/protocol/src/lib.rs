//! # Docket Protocol
//!
//! Shared data model for the docket aggregation engine: result shapes, the
//! provider capability traits the three search sources are consumed through,
//! and the per-source time budgets.
//!
//! Everything here is built fresh per query and never persisted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

mod error;

pub use error::ProviderError;

/// Which source produced a candidate.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    TaskIndex,
    RemoteAsset,
    Filesystem,
}

/// A single match from one source, prior to merging.
///
/// Invariant: `matched_identifier` satisfies the matches-predicate against the
/// query that produced this candidate.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CandidateMatch {
    pub source: SearchSource,
    /// Source-native handle: task id, remote project id, or filesystem path.
    pub source_ref: String,
    pub display_name: String,
    pub matched_identifier: String,
    /// URL or filesystem path a caller can open.
    pub locator: String,
    pub modified_at: Option<SystemTime>,
    /// Always 0 at search time; counting files during a scan is deliberately
    /// skipped, callers that need a count compute it lazily afterwards.
    pub file_count: u64,
}

/// The merged, source-tagged answer for one query.
///
/// Each sub-list is independently empty-safe: an empty list means that source
/// contributed nothing (no match, timed out, or unavailable), never an error.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AggregationResult {
    pub docket_number: String,
    pub job_name: Option<String>,
    pub task_matches: Vec<CandidateMatch>,
    pub asset_matches: Vec<CandidateMatch>,
    pub folder_matches: Vec<CandidateMatch>,
}

impl AggregationResult {
    /// All-empty result for a query, used by the malformed-input short-circuit.
    pub fn empty(docket_number: impl Into<String>, job_name: Option<String>) -> Self {
        Self {
            docket_number: docket_number.into(),
            job_name,
            task_matches: Vec::new(),
            asset_matches: Vec::new(),
            folder_matches: Vec::new(),
        }
    }

    pub fn total_matches(&self) -> usize {
        self.task_matches.len() + self.asset_matches.len() + self.folder_matches.len()
    }
}

/// One row of the pre-synced task snapshot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TaskRecord {
    pub id: String,
    /// Free text the docket identifier is extracted from, e.g. "25464-AB Mix".
    pub identifier_text: String,
    pub display_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub modified_at: Option<SystemTime>,
}

/// Cheap catalog row from the remote asset service's listing endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
}

/// Expensive per-project payload from the remote detail endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ProjectDetails {
    /// The service's own docket field, when it maintains one. A populated
    /// field that contradicts the query disqualifies the candidate.
    #[serde(default)]
    pub docket_field: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Per-source wall-clock allowances. A source exceeding its budget contributes
/// an empty list; the budgets are independent, so one slow source never delays
/// the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceBudgets {
    pub task_index: Duration,
    pub remote_asset: Duration,
    pub filesystem: Duration,
}

impl Default for SourceBudgets {
    fn default() -> Self {
        Self {
            task_index: Duration::from_secs(10),
            remote_asset: Duration::from_secs(15),
            // Largest budget: these roots may sit on slow network mounts.
            filesystem: Duration::from_secs(30),
        }
    }
}

/// Snapshot view of the task index. `load_all` is synchronous by contract:
/// the cache is already synced by its owner, this is a memory read.
pub trait TaskIndexProvider: Send + Sync {
    fn load_all(&self) -> Vec<TaskRecord>;
}

/// The remote asset-management catalog. Implementations own authentication
/// and transport; callers only see the two-phase listing/detail shape.
#[async_trait]
pub trait RemoteAssetProvider: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ProviderError>;

    async fn get_project_details(&self, id: &str) -> Result<ProjectDetails, ProviderError>;
}
