use crate::adapters::outbound::storage::{ArtifactRecord, InMemoryPropertyStore};
use crate::inspection::domain::RepoPath;
use crate::shared::error::SyncError;
use crate::shared::security::{ensure_not_symlink, read_regular_file, MAX_SNAPSHOT_FILE_SIZE};
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Current snapshot format version
const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout: repository key -> relative path -> record.
/// The repository root is stored under the empty relative path.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    repositories: BTreeMap<String, BTreeMap<String, ArtifactRecord>>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// PropertySnapshotFile adapter persisting the property store as JSON
///
/// Saving writes a temporary file next to the target and renames it over the
/// target, so a crash mid-write leaves the previous snapshot intact.
pub struct PropertySnapshotFile {
    path: PathBuf,
}

impl PropertySnapshotFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot into a fresh in-memory store
    ///
    /// # Errors
    /// Returns a store error if the file is missing, unsafe, or malformed
    pub fn load(&self) -> Result<InMemoryPropertyStore> {
        let content = read_regular_file(&self.path, "property snapshot", MAX_SNAPSHOT_FILE_SIZE)
            .map_err(|e| SyncError::store("load", self.path.display(), e))?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(|e| SyncError::store("load", self.path.display(), format!("malformed JSON: {}", e)))?;

        if snapshot.version > SNAPSHOT_VERSION {
            return Err(SyncError::store(
                "load",
                self.path.display(),
                format!(
                    "snapshot version {} is newer than supported version {}",
                    snapshot.version, SNAPSHOT_VERSION
                ),
            )
            .into());
        }

        let records = snapshot
            .repositories
            .into_iter()
            .flat_map(|(repo_key, paths)| {
                paths
                    .into_iter()
                    .map(move |(path, record)| (RepoPath::new(repo_key.clone(), path), record))
            });
        let store = InMemoryPropertyStore::from_records(records);
        tracing::debug!(path = %self.path.display(), repositories = store.repositories().len(), "Property snapshot loaded");
        Ok(store)
    }

    /// Atomically replaces the snapshot with the store's current content
    pub fn save(&self, store: &InMemoryPropertyStore) -> Result<()> {
        ensure_not_symlink(&self.path)?;

        let mut snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            repositories: BTreeMap::new(),
        };
        for (path, record) in store.records() {
            snapshot
                .repositories
                .entry(path.repo_key().to_string())
                .or_default()
                .insert(path.path().to_string(), record);
        }
        let json = serde_json::to_string_pretty(&snapshot)?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(&parent)
            .map_err(|e| SyncError::store("save", self.path.display(), e))?;
        temp.write_all(json.as_bytes())
            .and_then(|_| temp.write_all(b"\n"))
            .map_err(|e| SyncError::store("save", self.path.display(), e))?;
        temp.persist(&self.path)
            .map_err(|e| SyncError::store("save", self.path.display(), e.error))?;

        tracing::debug!(path = %self.path.display(), "Property snapshot saved");
        Ok(())
    }
}
