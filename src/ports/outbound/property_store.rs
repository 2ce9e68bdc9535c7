use crate::inspection::domain::{LayoutInfo, RepoPath};
use crate::shared::Result;

/// PropertyStore port for the host repository manager's per-path properties
///
/// This port abstracts the storage collaborator: a path-scoped string property
/// store with search, plus the listing and layout accessors the engine needs.
/// Writes are last-writer-wins; no compare-and-swap is assumed.
///
/// Implementations must be `Send + Sync` so repositories and artifacts can be
/// processed concurrently.
pub trait PropertyStore: Send + Sync {
    /// Reads one property of a path
    ///
    /// # Returns
    /// The stored value, or `None` when the property is absent
    ///
    /// # Errors
    /// Returns an error if the store cannot be read
    fn get_property(&self, path: &RepoPath, key: &str) -> Result<Option<String>>;

    /// Writes several properties of one path as a single unit
    ///
    /// A reader never observes a subset of the given properties.
    ///
    /// # Errors
    /// Returns an error if the path does not exist or the write fails
    fn set_properties(&self, path: &RepoPath, properties: &[(String, String)]) -> Result<()>;

    /// Removes one property of a path; removing an absent property is not an error
    fn delete_property(&self, path: &RepoPath, key: &str) -> Result<()>;

    /// Finds every artifact path in a repository whose properties equal all filters
    ///
    /// # Arguments
    /// * `repo_key` - Repository to search
    /// * `filters` - `(key, value)` pairs that must all match exactly
    fn find_paths(&self, repo_key: &str, filters: &[(String, String)]) -> Result<Vec<RepoPath>>;

    /// Lists every artifact path of a repository (the root excluded)
    fn list_artifacts(&self, repo_key: &str) -> Result<Vec<RepoPath>>;

    /// Returns the layout metadata of a path, if the repository layout yields any
    fn layout_info(&self, path: &RepoPath) -> Result<Option<LayoutInfo>>;

    /// Convenience for writing a single property
    fn set_property(&self, path: &RepoPath, key: &str, value: &str) -> Result<()> {
        self.set_properties(path, &[(key.to_string(), value.to_string())])
    }
}
