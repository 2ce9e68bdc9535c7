use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of an artifact (or of a repository root) in the host repository manager
///
/// The repository root is the path with an empty relative part; repository-level
/// properties (aggregate status, checkpoint, project naming) live there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoPath {
    repo_key: String,
    path: String,
}

impl RepoPath {
    pub fn new(repo_key: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            repo_key: repo_key.into(),
            path: path.trim_matches('/').to_string(),
        }
    }

    /// The root path of a repository
    pub fn root(repo_key: impl Into<String>) -> Self {
        Self::new(repo_key, "")
    }

    pub fn repo_key(&self) -> &str {
        &self.repo_key
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Last segment of the path, used for name-pattern matching
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "{}", self.repo_key)
        } else {
            write!(f, "{}/{}", self.repo_key, self.path)
        }
    }
}

/// Structural layout metadata of an artifact path (organization/module/revision)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub base_revision: Option<String>,
}

impl LayoutInfo {
    pub fn new(organization: Option<&str>, module: Option<&str>, base_revision: Option<&str>) -> Self {
        Self {
            organization: organization.map(str::to_string),
            module: module.map(str::to_string),
            base_revision: base_revision.map(str::to_string),
        }
    }
}
