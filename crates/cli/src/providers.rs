use anyhow::{Context, Result};
use async_trait::async_trait;
use docket_protocol::{
    ProjectDetails, ProjectSummary, ProviderError, RemoteAssetProvider, TaskIndexProvider,
    TaskRecord,
};
use serde::Deserialize;
use std::path::Path;

/// Task index backed by a `tasks.json` snapshot: a JSON array of
/// [`TaskRecord`] rows exported by whatever owns the real cache.
pub struct SnapshotTaskIndex {
    records: Vec<TaskRecord>,
}

impl SnapshotTaskIndex {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading task snapshot {}", path.display()))?;
        let records = serde_json::from_str(&json)
            .with_context(|| format!("parsing task snapshot {}", path.display()))?;
        Ok(Self { records })
    }

    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TaskIndexProvider for SnapshotTaskIndex {
    fn load_all(&self) -> Vec<TaskRecord> {
        self.records.clone()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    name: String,
    #[serde(default)]
    details: Option<ProjectDetails>,
}

/// Remote catalog backed by a `catalog.json` fixture: a JSON array of
/// `{id, name, details?}` entries. Stands in for the real asset service,
/// whose HTTP client and auth live outside this tool.
pub struct CatalogAssetProvider {
    entries: Vec<CatalogEntry>,
}

impl CatalogAssetProvider {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let entries = serde_json::from_str(&json)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

#[async_trait]
impl RemoteAssetProvider for CatalogAssetProvider {
    async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ProviderError> {
        Ok(self
            .entries
            .iter()
            .map(|entry| ProjectSummary {
                id: entry.id.clone(),
                name: entry.name.clone(),
            })
            .collect())
    }

    async fn get_project_details(&self, id: &str) -> Result<ProjectDetails, ProviderError> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| ProviderError::Other(format!("unknown project {id}")))?;
        Ok(entry.details.clone().unwrap_or_default())
    }
}
