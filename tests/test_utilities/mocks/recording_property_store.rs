use bom_artifact_sync::adapters::outbound::storage::InMemoryPropertyStore;
use bom_artifact_sync::prelude::*;
use std::sync::{Arc, Mutex};

/// PropertyStore wrapper recording every inspection status write, in order
#[derive(Clone)]
pub struct RecordingPropertyStore {
    inner: Arc<InMemoryPropertyStore>,
    status_key: String,
    writes: Arc<Mutex<Vec<(RepoPath, String)>>>,
}

impl RecordingPropertyStore {
    pub fn new(inner: InMemoryPropertyStore, keys: &PropertyKeys) -> Self {
        Self {
            inner: Arc::new(inner),
            status_key: keys.inspection_status(),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn inner(&self) -> &InMemoryPropertyStore {
        &self.inner
    }

    /// Status values written to one path, oldest first
    pub fn history(&self, path: &RepoPath) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, status)| status.clone())
            .collect()
    }

    pub fn written_paths(&self) -> Vec<RepoPath> {
        let mut paths: Vec<RepoPath> = self
            .writes
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }
}

impl PropertyStore for RecordingPropertyStore {
    fn get_property(&self, path: &RepoPath, key: &str) -> Result<Option<String>> {
        self.inner.get_property(path, key)
    }

    fn set_properties(&self, path: &RepoPath, properties: &[(String, String)]) -> Result<()> {
        self.inner.set_properties(path, properties)?;
        let mut writes = self.writes.lock().unwrap();
        for (key, value) in properties {
            if key == &self.status_key {
                writes.push((path.clone(), value.clone()));
            }
        }
        Ok(())
    }

    fn delete_property(&self, path: &RepoPath, key: &str) -> Result<()> {
        self.inner.delete_property(path, key)
    }

    fn find_paths(&self, repo_key: &str, filters: &[(String, String)]) -> Result<Vec<RepoPath>> {
        self.inner.find_paths(repo_key, filters)
    }

    fn list_artifacts(&self, repo_key: &str) -> Result<Vec<RepoPath>> {
        self.inner.list_artifacts(repo_key)
    }

    fn layout_info(&self, path: &RepoPath) -> Result<Option<bom_artifact_sync::inspection::domain::LayoutInfo>> {
        self.inner.layout_info(path)
    }
}
