use crate::inspection::domain::{LayoutInfo, RepoPath};
use crate::ports::outbound::PropertyStore;
use crate::shared::error::SyncError;
use crate::shared::Result;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Properties and layout of one stored path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutInfo>,
}

/// InMemoryPropertyStore adapter holding per-path properties in a concurrent map
///
/// This adapter implements the PropertyStore port. A multi-property write
/// holds the entry's shard lock for its whole duration, so readers never see
/// a partial write. Repository roots exist as soon as the repository has an
/// artifact or is registered with [`add_repository`](Self::add_repository).
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    entries: DashMap<RepoPath, ArtifactRecord>,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously captured records
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (RepoPath, ArtifactRecord)>,
    {
        let store = Self::new();
        for (path, record) in records {
            store.add_repository(path.repo_key());
            store.entries.insert(path, record);
        }
        store
    }

    /// Registers a repository root without artifacts
    pub fn add_repository(&self, repo_key: &str) {
        self.entries.entry(RepoPath::root(repo_key)).or_default();
    }

    /// Registers an artifact path (and its repository root)
    pub fn add_artifact(&self, path: RepoPath) {
        self.add_repository(path.repo_key());
        self.entries.entry(path).or_default();
    }

    pub fn set_layout(&self, path: &RepoPath, layout: LayoutInfo) {
        if let Some(mut record) = self.entries.get_mut(path) {
            record.layout = Some(layout);
        }
    }

    /// All properties of a path; empty when the path is unknown
    pub fn properties(&self, path: &RepoPath) -> BTreeMap<String, String> {
        self.entries
            .get(path)
            .map(|record| record.properties.clone())
            .unwrap_or_default()
    }

    /// Keys of every known repository
    pub fn repositories(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .map(|entry| entry.key().repo_key().to_string())
            .collect()
    }

    /// Every record, ordered by path
    pub fn records(&self) -> Vec<(RepoPath, ArtifactRecord)> {
        let mut records: Vec<(RepoPath, ArtifactRecord)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        records.sort_by(|a, b| a.0.cmp(&b.0));
        records
    }

    fn collect_paths<F>(&self, repo_key: &str, accept: F) -> Vec<RepoPath>
    where
        F: Fn(&ArtifactRecord) -> bool,
    {
        let mut paths: Vec<RepoPath> = self
            .entries
            .iter()
            .filter(|entry| {
                let path = entry.key();
                path.repo_key() == repo_key && !path.is_root() && accept(entry.value())
            })
            .map(|entry| entry.key().clone())
            .collect();
        paths.sort();
        paths
    }
}

impl PropertyStore for InMemoryPropertyStore {
    fn get_property(&self, path: &RepoPath, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(path)
            .and_then(|record| record.properties.get(key).cloned()))
    }

    fn set_properties(&self, path: &RepoPath, properties: &[(String, String)]) -> Result<()> {
        let mut record = self
            .entries
            .get_mut(path)
            .ok_or_else(|| SyncError::store("set_properties", path, "path does not exist"))?;
        for (key, value) in properties {
            record.properties.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn delete_property(&self, path: &RepoPath, key: &str) -> Result<()> {
        if let Some(mut record) = self.entries.get_mut(path) {
            record.properties.remove(key);
        }
        Ok(())
    }

    fn find_paths(&self, repo_key: &str, filters: &[(String, String)]) -> Result<Vec<RepoPath>> {
        Ok(self.collect_paths(repo_key, |record| {
            filters
                .iter()
                .all(|(key, value)| record.properties.get(key) == Some(value))
        }))
    }

    fn list_artifacts(&self, repo_key: &str) -> Result<Vec<RepoPath>> {
        Ok(self.collect_paths(repo_key, |_| true))
    }

    fn layout_info(&self, path: &RepoPath) -> Result<Option<LayoutInfo>> {
        Ok(self.entries.get(path).and_then(|record| record.layout.clone()))
    }
}
